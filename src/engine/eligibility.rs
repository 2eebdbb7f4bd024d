// ==========================================
// 排班调度系统 - 当日可排判定引擎
// ==========================================
// 职责: 判定成员在给定日期能否被排班
// 输入: 成员主数据 + 当日营业时段 + 引擎私有排班状态
// 输出: (是否可排, 决策原因)
// 约定: 按成员按日独立判定,除 state 外无记忆;
//       state 只由 AllocationEngine 变更
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::member::{MemberScheduleState, TeamMember};
use crate::domain::timeslot::TimeSlot;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::eligibility_core::EligibilityCore;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// EligibilityEngine - 当日可排判定引擎
// ==========================================
pub struct EligibilityEngine<C>
where
    C: ScheduleConfigReader,
{
    config: Arc<C>,
}

impl<C> EligibilityEngine<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的 EligibilityEngine 实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self { config }
    }

    /// 判定单个成员当日是否可排
    ///
    /// 四项谓词全部成立才可排:
    /// 1) 当日不是休息日偏好
    /// 2) 剩余周工时 >= 当日班次时长
    /// 3) 连续工作天数 < 上限
    /// 4) 当日营业时段全部落入偏好窗口 (无条目则恒真)
    ///
    /// # 参数
    /// - member: 成员主数据
    /// - weekday: 当日星期
    /// - operating_slots: 当日营业时段
    /// - shift_duration: 当日班次总时长 (小时)
    /// - state: 成员当前排班状态
    ///
    /// # 返回
    /// - (bool, Vec<String>): 判定结果 + 决策原因
    #[instrument(skip(self, member, operating_slots, state), fields(member_id = %member.id))]
    pub fn evaluate(
        &self,
        member: &TeamMember,
        weekday: Weekday,
        operating_slots: &[TimeSlot],
        shift_duration: f64,
        state: &MemberScheduleState,
    ) -> EngineResult<(bool, Vec<String>)> {
        let max_consecutive_days = self
            .config
            .get_max_consecutive_days()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        let mut reasons = Vec::new();
        let mut eligible = true;

        if EligibilityCore::is_rest_day(&member.preferences, weekday) {
            reasons.push(format!("REST_DAY: {} 为休息日偏好", weekday));
            eligible = false;
        }

        if !EligibilityCore::has_hour_budget(state, shift_duration) {
            reasons.push(format!(
                "HOURS_EXHAUSTED: remaining={:.2}, shift={:.2}",
                state.remaining_weekly_hours, shift_duration
            ));
            eligible = false;
        }

        if !EligibilityCore::under_consecutive_cap(state, max_consecutive_days) {
            reasons.push(format!(
                "CONSECUTIVE_CAP: streak={}, cap={}",
                state.consecutive_working_days, max_consecutive_days
            ));
            eligible = false;
        }

        if !EligibilityCore::fits_preferred_windows(&member.preferences, weekday, operating_slots) {
            reasons.push(format!(
                "PREFERRED_WINDOW_MISMATCH: {} 营业时段超出偏好窗口",
                weekday
            ));
            eligible = false;
        }

        if eligible {
            reasons.push("ELIGIBLE".to_string());
        }

        Ok((eligible, reasons))
    }
}
