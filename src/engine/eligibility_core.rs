// ==========================================
// 排班调度系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 提供当日可排判定的四项纯谓词与偏好窗口裁剪
// 约定: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::member::{MemberPreferences, MemberScheduleState};
use crate::domain::timeslot::TimeSlot;
use crate::domain::types::Weekday;

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 谓词 1: 当日是否为成员的休息日
    ///
    /// # 参数
    /// - preferences: 成员偏好
    /// - weekday: 当日星期
    pub fn is_rest_day(preferences: &MemberPreferences, weekday: Weekday) -> bool {
        preferences.is_rest_day(weekday)
    }

    /// 谓词 2: 剩余周工时是否足够覆盖当日班次
    ///
    /// # 规则
    /// - remaining_weekly_hours >= shift_duration
    pub fn has_hour_budget(state: &MemberScheduleState, shift_duration: f64) -> bool {
        state.remaining_weekly_hours >= shift_duration
    }

    /// 谓词 3: 连续工作天数是否仍在上限之下
    ///
    /// # 规则
    /// - consecutive_working_days < max_consecutive_days
    pub fn under_consecutive_cap(state: &MemberScheduleState, max_consecutive_days: u32) -> bool {
        state.consecutive_working_days < max_consecutive_days
    }

    /// 谓词 4: 当日全部营业时段是否落入成员的偏好窗口
    ///
    /// # 规则
    /// - 该星期无偏好条目 → 恒真
    /// - 有条目 → 每个营业时段必须被其中某个窗口完整覆盖
    pub fn fits_preferred_windows(
        preferences: &MemberPreferences,
        weekday: Weekday,
        operating_slots: &[TimeSlot],
    ) -> bool {
        let windows = match preferences.windows_for(weekday) {
            Some(windows) => windows,
            None => return true,
        };

        operating_slots
            .iter()
            .all(|slot| windows.iter().any(|window| window.contains(slot)))
    }

    /// 将营业时段裁剪到成员的偏好窗口
    ///
    /// # 规则
    /// - 该星期无偏好条目 → 原样返回
    /// - 有条目 → 返回与首个相交窗口的交集
    ///   (准入已要求完整覆盖,交集通常等于原时段;
    ///    裁剪保留在此,使记录行为显式而非偶然)
    pub fn trim_to_preferred(
        preferences: &MemberPreferences,
        weekday: Weekday,
        slot: &TimeSlot,
    ) -> TimeSlot {
        let windows = match preferences.windows_for(weekday) {
            Some(windows) => windows,
            None => return *slot,
        };

        windows
            .iter()
            .find_map(|window| window.intersect(slot))
            .unwrap_or(*slot)
    }
}
