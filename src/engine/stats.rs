// ==========================================
// 排班调度系统 - 方案摘要引擎
// ==========================================
// 职责: 对已产出的排班做统计汇总,供外围应用展示
// 输入: DayAssignment 序列 + 花名册
// 输出: PlanSummary (整体指标 + 逐成员负荷)
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::plan::DayAssignment;
use crate::domain::member::TeamMember;
use crate::domain::timeslot::TimeSlot;
use crate::engine::error::EngineResult;
use crate::engine::staffing::StaffingTargetEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

const RATIO_EPSILON: f64 = 1e-9;

// ==========================================
// MemberLoad - 成员负荷
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLoad {
    pub member_id: String,   // 成员ID
    pub assigned_days: u32,  // 在班天数
    pub assigned_hours: f64, // 在班总工时
}

// ==========================================
// PlanSummary - 方案摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_days: usize,              // 窗口总天数
    pub open_days: usize,               // 营业天数
    pub closed_days: usize,             // 闭店天数
    pub understaffed_days: usize,       // 出勤率低于目标的营业天数
    pub average_presence_ratio: f64,    // 营业日平均出勤率
    pub member_loads: Vec<MemberLoad>,  // 逐成员负荷 (按花名册顺序)
}

// ==========================================
// PlanSummaryEngine - 方案摘要引擎
// ==========================================
pub struct PlanSummaryEngine<C>
where
    C: ScheduleConfigReader,
{
    staffing: StaffingTargetEngine<C>,
}

impl<C> PlanSummaryEngine<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的摘要引擎实例
    pub fn new(config: Arc<C>) -> Self {
        Self {
            staffing: StaffingTargetEngine::new(config),
        }
    }

    /// 汇总排班方案
    ///
    /// # 参数
    /// - days: 逐日记录
    /// - roster: 花名册
    ///
    /// # 返回
    /// PlanSummary: 营业/闭店/欠员天数、平均出勤率、逐成员负荷
    pub fn summarize(
        &self,
        days: &[DayAssignment],
        roster: &[TeamMember],
    ) -> EngineResult<PlanSummary> {
        let mut open_days = 0usize;
        let mut closed_days = 0usize;
        let mut understaffed_days = 0usize;
        let mut ratio_sum = 0.0f64;

        let mut loads: BTreeMap<&str, MemberLoad> = roster
            .iter()
            .map(|m| {
                (
                    m.id.as_str(),
                    MemberLoad {
                        member_id: m.id.clone(),
                        assigned_days: 0,
                        assigned_hours: 0.0,
                    },
                )
            })
            .collect();

        for day in days {
            if day.is_closed() {
                closed_days += 1;
                continue;
            }

            open_days += 1;
            ratio_sum += day.presence_ratio;

            let required_ratio = self.staffing.required_ratio(day.weekday)?;
            if day.presence_ratio < required_ratio - RATIO_EPSILON {
                understaffed_days += 1;
            }

            for assignment in &day.assigned_team {
                if let Some(load) = loads.get_mut(assignment.member_id.as_str()) {
                    load.assigned_days += 1;
                    load.assigned_hours += assignment
                        .slots
                        .iter()
                        .map(TimeSlot::duration_hours)
                        .sum::<f64>();
                }
            }
        }

        let average_presence_ratio = if open_days > 0 {
            ratio_sum / open_days as f64
        } else {
            0.0
        };

        // 按花名册顺序输出
        let member_loads = roster
            .iter()
            .filter_map(|m| loads.remove(m.id.as_str()))
            .collect();

        Ok(PlanSummary {
            total_days: days.len(),
            open_days,
            closed_days,
            understaffed_days,
            average_presence_ratio,
            member_loads,
        })
    }
}
