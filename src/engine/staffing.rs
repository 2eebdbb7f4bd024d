// ==========================================
// 排班调度系统 - 出勤目标引擎
// ==========================================
// 职责: 将星期映射为目标出勤率,并折算为目标人数
// 输入: 星期 + 花名册规模
// 输出: 目标出勤率 / 目标人数
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use std::sync::Arc;

// ==========================================
// StaffingTargetEngine - 出勤目标引擎
// ==========================================
pub struct StaffingTargetEngine<C>
where
    C: ScheduleConfigReader,
{
    config: Arc<C>,
}

impl<C> StaffingTargetEngine<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的 StaffingTargetEngine 实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    /// 获取某星期的目标出勤率
    ///
    /// # 返回
    /// - f64: (0, 1] 内的比例 (默认 周五/周六 0.9, 周日 0.5, 其余 0.7)
    pub fn required_ratio(&self, weekday: Weekday) -> EngineResult<f64> {
        self.config
            .get_presence_ratio(weekday)
            .map_err(|e| EngineError::ConfigError(e.to_string()))
    }

    /// 折算某星期的目标人数
    ///
    /// # 规则
    /// - required_headcount = ceil(roster_size * ratio), 夹在 [0, roster_size]
    ///
    /// # 参数
    /// - weekday: 星期
    /// - roster_size: 花名册人数
    pub fn required_headcount(&self, weekday: Weekday, roster_size: usize) -> EngineResult<usize> {
        let ratio = self.required_ratio(weekday)?;
        let headcount = (roster_size as f64 * ratio).ceil() as usize;
        Ok(headcount.min(roster_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfigManager;

    fn engine() -> StaffingTargetEngine<ScheduleConfigManager> {
        StaffingTargetEngine::new(Arc::new(ScheduleConfigManager::new()))
    }

    #[test]
    fn test_default_ratios() {
        let engine = engine();
        assert_eq!(engine.required_ratio(Weekday::Friday).unwrap(), 0.9);
        assert_eq!(engine.required_ratio(Weekday::Saturday).unwrap(), 0.9);
        assert_eq!(engine.required_ratio(Weekday::Sunday).unwrap(), 0.5);
        assert_eq!(engine.required_ratio(Weekday::Wednesday).unwrap(), 0.7);
    }

    #[test]
    fn test_headcount_rounds_up() {
        let engine = engine();
        // ceil(4 * 0.7) = 3
        assert_eq!(engine.required_headcount(Weekday::Monday, 4).unwrap(), 3);
        // ceil(4 * 0.9) = 4
        assert_eq!(engine.required_headcount(Weekday::Friday, 4).unwrap(), 4);
        // ceil(4 * 0.5) = 2
        assert_eq!(engine.required_headcount(Weekday::Sunday, 4).unwrap(), 2);
        // ceil(5 * 0.9) = 5
        assert_eq!(engine.required_headcount(Weekday::Saturday, 5).unwrap(), 5);
    }

    #[test]
    fn test_headcount_clamped_to_roster() {
        let engine = engine();
        assert_eq!(engine.required_headcount(Weekday::Friday, 0).unwrap(), 0);
        // 比例为 1.0 时不超出花名册
        let mut config = ScheduleConfigManager::new();
        config.set_presence_ratio(Weekday::Monday, 1.0).unwrap();
        let engine = StaffingTargetEngine::new(Arc::new(config));
        assert_eq!(engine.required_headcount(Weekday::Monday, 7).unwrap(), 7);
    }

    #[test]
    fn test_headcount_with_override() {
        let mut config = ScheduleConfigManager::new();
        config.set_presence_ratio(Weekday::Sunday, 0.25).unwrap();
        let engine = StaffingTargetEngine::new(Arc::new(config));
        // ceil(10 * 0.25) = 3
        assert_eq!(engine.required_headcount(Weekday::Sunday, 10).unwrap(), 3);
    }
}
