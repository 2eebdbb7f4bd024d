// ==========================================
// 排班调度系统 - 排班校验引擎
// ==========================================
// 职责: 对已产出的排班独立复查全部不变式
// 输入: DayAssignment 序列 + 花名册 + 营业日历
// 输出: 违规记录列表 (空列表即通过)
// 约定: 仅用于测试/审计,不回馈生成过程
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::calendar::OperatingCalendar;
use crate::domain::member::{MemberScheduleState, TeamMember};
use crate::domain::plan::DayAssignment;
use crate::engine::eligibility::EligibilityEngine;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::staffing::StaffingTargetEngine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

const HOURS_EPSILON: f64 = 1e-9;

// ==========================================
// 违规类型 (Violation Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    ClosedDayStaffed,   // 闭店日出现在班成员
    QuotaExceeded,      // 7日块内累计工时超出周配额
    StreakExceeded,     // 连续工作天数超出上限
    RestDayAssigned,    // 休息日偏好被排班
    HeadcountMismatch,  // 当日人数 ≠ min(目标人数, 可排人数)
    UnknownMember,      // 在班成员不在花名册
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::ClosedDayStaffed => write!(f, "CLOSED_DAY_STAFFED"),
            ViolationKind::QuotaExceeded => write!(f, "QUOTA_EXCEEDED"),
            ViolationKind::StreakExceeded => write!(f, "STREAK_EXCEEDED"),
            ViolationKind::RestDayAssigned => write!(f, "REST_DAY_ASSIGNED"),
            ViolationKind::HeadcountMismatch => write!(f, "HEADCOUNT_MISMATCH"),
            ViolationKind::UnknownMember => write!(f, "UNKNOWN_MEMBER"),
        }
    }
}

// ==========================================
// ValidationViolation - 违规详情
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// 违规类型
    pub kind: ViolationKind,
    /// 违规日期
    pub date: NaiveDate,
    /// 涉及成员 (整日性违规为 None)
    pub member_id: Option<String>,
    /// 违规原因
    pub reason: String,
    /// 额外信息 (可选)
    pub details: Option<serde_json::Value>,
}

// ==========================================
// ScheduleValidator - 排班校验引擎
// ==========================================
pub struct ScheduleValidator<C>
where
    C: ScheduleConfigReader,
{
    config: Arc<C>,
    eligibility: EligibilityEngine<C>,
    staffing: StaffingTargetEngine<C>,
}

impl<C> ScheduleValidator<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的校验引擎实例
    ///
    /// # 参数
    /// - config: 配置读取器 (须与生成时一致,否则人数核对无意义)
    pub fn new(config: Arc<C>) -> Self {
        Self {
            eligibility: EligibilityEngine::new(config.clone()),
            staffing: StaffingTargetEngine::new(config.clone()),
            config,
        }
    }

    /// 复查排班的全部不变式
    ///
    /// 按日期顺序重放成员状态 (与生成算法同一套变更规则),
    /// 逐日核对:
    /// 1) 闭店日无人在班
    /// 2) 任一成员任一 7 日块累计工时不超周配额
    /// 3) 连续工作天数不超上限
    /// 4) 休息日偏好从未被排班
    /// 5) 营业日人数 = min(目标人数, 当日可排人数)
    ///
    /// # 参数
    /// - days: 已产出的逐日记录 (按日期有序)
    /// - roster: 花名册
    /// - calendar: 营业日历
    ///
    /// # 返回
    /// 违规记录列表; 空列表表示全部不变式成立
    #[instrument(skip(self, days, roster, calendar), fields(
        days_count = days.len(),
        roster_size = roster.len()
    ))]
    pub fn validate(
        &self,
        days: &[DayAssignment],
        roster: &[TeamMember],
        calendar: &OperatingCalendar,
    ) -> EngineResult<Vec<ValidationViolation>> {
        let max_consecutive_days = self
            .config
            .get_max_consecutive_days()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        let members_by_id: BTreeMap<&str, &TeamMember> =
            roster.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut states: BTreeMap<String, MemberScheduleState> = roster
            .iter()
            .map(|m| (m.id.clone(), MemberScheduleState::new(m)))
            .collect();

        let mut violations = Vec::new();

        for (index, day) in days.iter().enumerate() {
            // 与生成算法一致: 以序列首日为基准的 7 日块重置工时
            if index % 7 == 0 {
                for member in roster {
                    if let Some(state) = states.get_mut(&member.id) {
                        state.reset_weekly_hours(member.weekly_hour_quota);
                    }
                }
            }

            let template = calendar.resolve(day.date)?;

            // ===== 检查1: 闭店日无人在班 =====
            if template.closed {
                if !day.assigned_team.is_empty() || day.presence_ratio != 0.0 {
                    violations.push(ValidationViolation {
                        kind: ViolationKind::ClosedDayStaffed,
                        date: day.date,
                        member_id: None,
                        reason: format!(
                            "闭店日有 {} 名成员在班",
                            day.assigned_team.len()
                        ),
                        details: Some(json!({
                            "assigned_count": day.assigned_team.len(),
                            "presence_ratio": day.presence_ratio,
                        })),
                    });
                }
                // 闭店日不变更任何状态
                continue;
            }

            let shift_duration = template.total_hours();

            // ===== 检查5: 人数 = min(目标, 可排), 须在变更状态前核对 =====
            let required_headcount = self
                .staffing
                .required_headcount(day.weekday, roster.len())?;
            let mut eligible_count = 0usize;
            for member in roster {
                if let Some(state) = states.get(&member.id) {
                    let (ok, _) = self.eligibility.evaluate(
                        member,
                        day.weekday,
                        &template.slots,
                        shift_duration,
                        state,
                    )?;
                    if ok {
                        eligible_count += 1;
                    }
                }
            }
            let expected = required_headcount.min(eligible_count);
            if day.assigned_team.len() != expected {
                violations.push(ValidationViolation {
                    kind: ViolationKind::HeadcountMismatch,
                    date: day.date,
                    member_id: None,
                    reason: format!(
                        "当日在班 {} 人,应为 min(目标 {}, 可排 {}) = {}",
                        day.assigned_team.len(),
                        required_headcount,
                        eligible_count,
                        expected
                    ),
                    details: Some(json!({
                        "assigned_count": day.assigned_team.len(),
                        "required_headcount": required_headcount,
                        "eligible_count": eligible_count,
                        "expected": expected,
                    })),
                });
            }

            // ===== 检查2-4: 逐成员核对并重放状态 =====
            for assignment in &day.assigned_team {
                let member = match members_by_id.get(assignment.member_id.as_str()) {
                    Some(member) => *member,
                    None => {
                        violations.push(ValidationViolation {
                            kind: ViolationKind::UnknownMember,
                            date: day.date,
                            member_id: Some(assignment.member_id.clone()),
                            reason: "在班成员不在花名册".to_string(),
                            details: None,
                        });
                        continue;
                    }
                };

                if member.preferences.is_rest_day(day.weekday) {
                    violations.push(ValidationViolation {
                        kind: ViolationKind::RestDayAssigned,
                        date: day.date,
                        member_id: Some(member.id.clone()),
                        reason: format!("{} 为休息日偏好却被排班", day.weekday),
                        details: None,
                    });
                }

                if let Some(state) = states.get_mut(&member.id) {
                    state.remaining_weekly_hours -= shift_duration;
                    state.consecutive_working_days += 1;

                    if state.remaining_weekly_hours < -HOURS_EPSILON {
                        violations.push(ValidationViolation {
                            kind: ViolationKind::QuotaExceeded,
                            date: day.date,
                            member_id: Some(member.id.clone()),
                            reason: format!(
                                "7日块累计工时超出周配额 {:.2} 小时",
                                -state.remaining_weekly_hours
                            ),
                            details: Some(json!({
                                "weekly_hour_quota": member.weekly_hour_quota,
                                "excess_hours": -state.remaining_weekly_hours,
                            })),
                        });
                    }

                    if state.consecutive_working_days > max_consecutive_days {
                        violations.push(ValidationViolation {
                            kind: ViolationKind::StreakExceeded,
                            date: day.date,
                            member_id: Some(member.id.clone()),
                            reason: format!(
                                "连续工作 {} 天,超出上限 {}",
                                state.consecutive_working_days, max_consecutive_days
                            ),
                            details: Some(json!({
                                "streak": state.consecutive_working_days,
                                "max_consecutive_days": max_consecutive_days,
                            })),
                        });
                    }
                }
            }

            // 未在班成员连续天数清零 (与生成算法一致)
            for member in roster {
                if !day.contains_member(&member.id) {
                    if let Some(state) = states.get_mut(&member.id) {
                        state.consecutive_working_days = 0;
                    }
                }
            }
        }

        Ok(violations)
    }
}
