// ==========================================
// 排班调度系统 - 工作时段领域模型
// ==========================================
// 职责: 同日 start-end 时段的时长计算、有效性与重叠判定
// 约定: 时段仅限同一天内, end 必须晚于 start
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

// ==========================================
// TimeSlot - 工作时段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime, // 开始时刻
    pub end: NaiveTime,   // 结束时刻
}

impl TimeSlot {
    /// 创建时段,校验 end > start
    ///
    /// # 参数
    /// - start: 开始时刻
    /// - end: 结束时刻
    ///
    /// # 返回
    /// - Ok(TimeSlot): 有效时段
    /// - Err(EngineError::InvalidSlot): end 不晚于 start
    pub fn new(start: NaiveTime, end: NaiveTime) -> EngineResult<Self> {
        let slot = Self { start, end };
        slot.validate()?;
        Ok(slot)
    }

    /// 按 时:分 创建时段
    ///
    /// # 参数
    /// - start_h, start_m: 开始 时:分
    /// - end_h, end_m: 结束 时:分
    pub fn from_hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> EngineResult<Self> {
        let start = NaiveTime::from_hms_opt(start_h, start_m, 0).ok_or_else(|| {
            EngineError::Other(anyhow::anyhow!("无效时刻: {}:{:02}", start_h, start_m))
        })?;
        let end = NaiveTime::from_hms_opt(end_h, end_m, 0).ok_or_else(|| {
            EngineError::Other(anyhow::anyhow!("无效时刻: {}:{:02}", end_h, end_m))
        })?;
        Self::new(start, end)
    }

    /// 校验时段有效性 (end > start)
    ///
    /// 反序列化得到的时段可能绕过 new(),解析模板时须重新校验
    pub fn validate(&self) -> EngineResult<()> {
        if self.end <= self.start {
            return Err(EngineError::InvalidSlot {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// 计算时段时长 (小时,含小数)
    ///
    /// # 规则
    /// - duration = (endH + endM/60) - (startH + startM/60)
    pub fn duration_hours(&self) -> f64 {
        let start = self.start.hour() as f64 + self.start.minute() as f64 / 60.0;
        let end = self.end.hour() as f64 + self.end.minute() as f64 / 60.0;
        end - start
    }

    /// 判断两个时段是否重叠
    ///
    /// # 规则
    /// - overlaps(a, b) ⟺ a.start < b.end && b.start < a.end
    ///
    /// 仅用于配置期校验模板内时段互不重叠,
    /// 引擎不会修复重叠模板,只会快速失败
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// 判断本时段是否完整覆盖另一时段
    ///
    /// # 返回
    /// - true: other 完全落在本时段内
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// 计算两个时段的交集
    ///
    /// # 返回
    /// - Some(TimeSlot): 交集非空
    /// - None: 不相交
    pub fn intersect(&self, other: &TimeSlot) -> Option<TimeSlot> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TimeSlot { start, end })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeSlot {
        TimeSlot::from_hm(start_h, start_m, end_h, end_m).unwrap()
    }

    #[test]
    fn test_duration_hours_whole() {
        // 09:00-17:00 → 8小时
        assert_eq!(slot(9, 0, 17, 0).duration_hours(), 8.0);
    }

    #[test]
    fn test_duration_hours_fractional() {
        // 08:30-20:15 → 11.75小时
        let d = slot(8, 30, 20, 15).duration_hours();
        assert!((d - 11.75).abs() < 1e-9);

        // 08:45-12:30 → 3.75小时
        let d = slot(8, 45, 12, 30).duration_hours();
        assert!((d - 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_new_rejects_inverted_slot() {
        let result = TimeSlot::from_hm(17, 0, 9, 0);
        assert!(matches!(result, Err(EngineError::InvalidSlot { .. })));

        // 零长度同样无效
        let result = TimeSlot::from_hm(9, 0, 9, 0);
        assert!(matches!(result, Err(EngineError::InvalidSlot { .. })));
    }

    #[test]
    fn test_overlaps() {
        let a = slot(9, 0, 12, 0);
        let b = slot(11, 0, 14, 0);
        let c = slot(12, 0, 14, 0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // 首尾相接不算重叠
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_contains() {
        let day = slot(8, 30, 20, 15);
        let morning = slot(9, 0, 12, 0);

        assert!(day.contains(&morning));
        assert!(!morning.contains(&day));
        // 自身覆盖自身
        assert!(day.contains(&day));
    }

    #[test]
    fn test_intersect() {
        let a = slot(9, 0, 12, 0);
        let b = slot(10, 0, 14, 0);

        let i = a.intersect(&b).unwrap();
        assert_eq!(i, slot(10, 0, 12, 0));

        // 不相交
        let c = slot(13, 0, 14, 0);
        assert!(a.intersect(&c).is_none());
    }
}
