// ==========================================
// 排班调度系统 - 排班配置管理器
// ==========================================
// 职责: ScheduleConfigReader 的内存实现
// 约定: 默认值即出厂值,调用方可在生成前逐项覆盖
// ==========================================

use crate::config::schedule_config_trait::ScheduleConfigReader;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;

// ===== 出厂默认值 =====
const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 5;
const DEFAULT_STREAK_WEIGHT: f64 = 2.0;
const DEFAULT_RATIO_FRIDAY_SATURDAY: f64 = 0.9;
const DEFAULT_RATIO_SUNDAY: f64 = 0.5;
const DEFAULT_RATIO_OTHER: f64 = 0.7;

// ==========================================
// ScheduleConfigManager - 内存配置管理器
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfigManager {
    max_consecutive_days: u32,
    streak_weight: f64,
    presence_ratios: BTreeMap<Weekday, f64>,
}

impl ScheduleConfigManager {
    /// 出厂配置
    pub fn new() -> Self {
        let mut presence_ratios = BTreeMap::new();
        for weekday in Weekday::ALL {
            let ratio = match weekday {
                Weekday::Friday | Weekday::Saturday => DEFAULT_RATIO_FRIDAY_SATURDAY,
                Weekday::Sunday => DEFAULT_RATIO_SUNDAY,
                _ => DEFAULT_RATIO_OTHER,
            };
            presence_ratios.insert(weekday, ratio);
        }

        Self {
            max_consecutive_days: DEFAULT_MAX_CONSECUTIVE_DAYS,
            streak_weight: DEFAULT_STREAK_WEIGHT,
            presence_ratios,
        }
    }

    /// 覆盖连续工作天数上限
    ///
    /// # 规则
    /// - 必须 >= 1
    pub fn set_max_consecutive_days(&mut self, days: u32) -> EngineResult<()> {
        if days == 0 {
            return Err(EngineError::InvalidConfigValue {
                key: "max_consecutive_days".to_string(),
                value: days.to_string(),
                reason: "必须 >= 1".to_string(),
            });
        }
        self.max_consecutive_days = days;
        Ok(())
    }

    /// 覆盖连续天数权重
    ///
    /// # 规则
    /// - 必须为有限非负数
    pub fn set_streak_weight(&mut self, weight: f64) -> EngineResult<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(EngineError::InvalidConfigValue {
                key: "streak_weight".to_string(),
                value: weight.to_string(),
                reason: "必须为有限非负数".to_string(),
            });
        }
        self.streak_weight = weight;
        Ok(())
    }

    /// 覆盖某星期的目标出勤率
    ///
    /// # 规则
    /// - 必须落在 (0, 1]
    pub fn set_presence_ratio(&mut self, weekday: Weekday, ratio: f64) -> EngineResult<()> {
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(EngineError::InvalidConfigValue {
                key: format!("presence_ratio.{}", weekday),
                value: ratio.to_string(),
                reason: "必须落在 (0, 1]".to_string(),
            });
        }
        self.presence_ratios.insert(weekday, ratio);
        Ok(())
    }
}

impl Default for ScheduleConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// ScheduleConfigReader trait 实现
// ==========================================
impl ScheduleConfigReader for ScheduleConfigManager {
    fn get_max_consecutive_days(&self) -> Result<u32, Box<dyn Error>> {
        Ok(self.max_consecutive_days)
    }

    fn get_streak_weight(&self) -> Result<f64, Box<dyn Error>> {
        Ok(self.streak_weight)
    }

    fn get_presence_ratio(&self, weekday: Weekday) -> Result<f64, Box<dyn Error>> {
        // new() 填满七天,此处查不到即为内部错误
        self.presence_ratios
            .get(&weekday)
            .copied()
            .ok_or_else(|| format!("presence_ratio 未配置: {}", weekday).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ScheduleConfigManager::new();
        assert_eq!(config.get_max_consecutive_days().unwrap(), 5);
        assert_eq!(config.get_streak_weight().unwrap(), 2.0);
        assert_eq!(config.get_presence_ratio(Weekday::Friday).unwrap(), 0.9);
        assert_eq!(config.get_presence_ratio(Weekday::Saturday).unwrap(), 0.9);
        assert_eq!(config.get_presence_ratio(Weekday::Sunday).unwrap(), 0.5);
        assert_eq!(config.get_presence_ratio(Weekday::Tuesday).unwrap(), 0.7);
    }

    #[test]
    fn test_override_presence_ratio() {
        let mut config = ScheduleConfigManager::new();
        config.set_presence_ratio(Weekday::Sunday, 1.0).unwrap();
        assert_eq!(config.get_presence_ratio(Weekday::Sunday).unwrap(), 1.0);
    }

    #[test]
    fn test_reject_out_of_range_ratio() {
        let mut config = ScheduleConfigManager::new();
        assert!(config.set_presence_ratio(Weekday::Monday, 0.0).is_err());
        assert!(config.set_presence_ratio(Weekday::Monday, 1.2).is_err());
        assert!(config.set_presence_ratio(Weekday::Monday, f64::NAN).is_err());
        // 未被破坏
        assert_eq!(config.get_presence_ratio(Weekday::Monday).unwrap(), 0.7);
    }

    #[test]
    fn test_reject_zero_consecutive_cap() {
        let mut config = ScheduleConfigManager::new();
        assert!(config.set_max_consecutive_days(0).is_err());
        config.set_max_consecutive_days(6).unwrap();
        assert_eq!(config.get_max_consecutive_days().unwrap(), 6);
    }

    #[test]
    fn test_reject_negative_streak_weight() {
        let mut config = ScheduleConfigManager::new();
        assert!(config.set_streak_weight(-1.0).is_err());
        config.set_streak_weight(0.0).unwrap();
        assert_eq!(config.get_streak_weight().unwrap(), 0.0);
    }
}
