// ==========================================
// 排班调度系统 - 排班配置读取 Trait
// ==========================================
// 职责: 定义引擎所需的配置读取接口 (不包含实现)
// 约定: 只读接口; 引擎为纯同步计算,接口同样为同步
// ==========================================

use crate::domain::types::Weekday;
use std::error::Error;

// ==========================================
// ScheduleConfigReader Trait
// ==========================================
// 用途: 引擎各环节的可调参数来源
// 实现者: ScheduleConfigManager (内存实现,调用方可覆盖默认值)
pub trait ScheduleConfigReader: Send + Sync {
    /// 获取连续工作天数上限
    ///
    /// # 返回
    /// - u32: 连续天数上限 (按日历天计,跨周界不清零)
    ///
    /// # 默认值
    /// - 5
    fn get_max_consecutive_days(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取优先级得分中的连续天数权重
    ///
    /// # 返回
    /// - f64: 权重系数
    ///
    /// # 默认值
    /// - 2.0
    ///
    /// # 用途
    /// - priority_score = remaining_weekly_hours
    ///   + weight * (max_consecutive_days - consecutive_working_days)
    fn get_streak_weight(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取某星期的目标出勤率
    ///
    /// # 参数
    /// - weekday: 星期
    ///
    /// # 返回
    /// - f64: (0, 1] 内的比例
    ///
    /// # 默认值
    /// - 周五、周六: 0.90
    /// - 周日: 0.50
    /// - 其余: 0.70
    fn get_presence_ratio(&self, weekday: Weekday) -> Result<f64, Box<dyn Error>>;
}
