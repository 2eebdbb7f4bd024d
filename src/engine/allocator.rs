// ==========================================
// 排班调度系统 - 班次分配引擎
// ==========================================
// 职责: 协调可排判定、出勤目标、候选排序,逐日生成排班
// 输入: 花名册 + 营业日历 + 排班窗口
// 输出: 按日期有序的 DayAssignment 序列 (窗口内每日一条)
// 约定: 单次确定性遍历,校验通过后逐日循环不再失败;
//       校验失败时不产生任何部分输出
// ==========================================

use crate::config::ScheduleConfigReader;
use crate::domain::calendar::OperatingCalendar;
use crate::domain::member::{MemberScheduleState, TeamMember};
use crate::domain::plan::{DayAssignment, MemberAssignment, SchedulePlan, SchedulingWindow};
use crate::domain::types::Weekday;
use crate::engine::eligibility::EligibilityEngine;
use crate::engine::eligibility_core::EligibilityCore;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::priority::PrioritySorter;
use crate::engine::staffing::StaffingTargetEngine;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// AllocationEngine - 班次分配引擎
// ==========================================
pub struct AllocationEngine<C>
where
    C: ScheduleConfigReader,
{
    config: Arc<C>,
    eligibility: EligibilityEngine<C>,
    staffing: StaffingTargetEngine<C>,
    sorter: PrioritySorter,
}

impl<C> AllocationEngine<C>
where
    C: ScheduleConfigReader,
{
    /// 创建新的分配引擎实例
    ///
    /// # 参数
    /// - config: 配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            eligibility: EligibilityEngine::new(config.clone()),
            staffing: StaffingTargetEngine::new(config.clone()),
            sorter: PrioritySorter::new(),
            config,
        }
    }

    /// 生成排班 (核心入口)
    ///
    /// 算法,对窗口内每个日期 d 按时间顺序:
    /// 1) d 进入新的 7 日块时重置全员剩余周工时 (连续天数不重置)
    /// 2) 解析当日模板; 闭店则输出空记录并跳过 (不变更任何状态)
    /// 3) 班次时长 = 当日各时段时长之和
    /// 4) 计算目标人数
    /// 5) 逐成员判定可排
    /// 6) 按优先级得分排序,得分并列按成员ID升序
    /// 7) 选取前 min(目标人数, 可排人数); 人手不足不是错误
    /// 8) 被选成员扣减工时、连续天数+1,记录指派时段
    /// 9) 未被选成员 (无论不可排还是落选) 连续天数清零
    /// 10) 输出当日 DayAssignment
    ///
    /// # 参数
    /// - roster: 花名册 (只读)
    /// - calendar: 营业日历 (只读)
    /// - window: 排班窗口
    ///
    /// # 返回
    /// 按日期有序的 DayAssignment 序列
    #[instrument(skip(self, roster, calendar), fields(
        window_start = %window.start,
        window_end = %window.end,
        roster_size = roster.len()
    ))]
    pub fn generate(
        &self,
        roster: &[TeamMember],
        calendar: &OperatingCalendar,
        window: &SchedulingWindow,
    ) -> EngineResult<Vec<DayAssignment>> {
        self.validate_inputs(roster, calendar, window)?;

        let max_consecutive_days = self
            .config
            .get_max_consecutive_days()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;
        let streak_weight = self
            .config
            .get_streak_weight()
            .map_err(|e| EngineError::ConfigError(e.to_string()))?;

        info!(
            max_consecutive_days,
            streak_weight, "开始执行排班生成"
        );

        // 引擎私有状态: 本次调用创建,调用结束即弃
        let mut states: BTreeMap<String, MemberScheduleState> = roster
            .iter()
            .map(|m| (m.id.clone(), MemberScheduleState::new(m)))
            .collect();

        let mut days = Vec::with_capacity(window.num_days() as usize);

        for (index, date) in window.dates().enumerate() {
            // ===== 步骤1: 周界重置 (以窗口起始日为基准的 7 日块) =====
            if index % 7 == 0 {
                for member in roster {
                    if let Some(state) = states.get_mut(&member.id) {
                        state.reset_weekly_hours(member.weekly_hour_quota);
                    }
                }
            }

            let weekday = Weekday::from_date(date);
            let template = calendar.resolve_weekday(weekday)?;

            // ===== 步骤2: 闭店日输出空记录,全员状态原样保留 =====
            if template.closed {
                debug!(%date, %weekday, "闭店日,跳过排班");
                days.push(DayAssignment::closed_day(date, weekday));
                continue;
            }

            // ===== 步骤3-4: 班次时长与目标人数 =====
            let shift_duration = template.total_hours();
            let required_headcount = self.staffing.required_headcount(weekday, roster.len())?;

            // ===== 步骤5: 逐成员可排判定 =====
            let mut eligible: Vec<(&TeamMember, MemberScheduleState)> = Vec::new();
            for member in roster {
                if let Some(state) = states.get(&member.id) {
                    let (ok, _reasons) = self.eligibility.evaluate(
                        member,
                        weekday,
                        &template.slots,
                        shift_duration,
                        state,
                    )?;
                    if ok {
                        eligible.push((member, state.clone()));
                    }
                }
            }

            // ===== 步骤6-7: 排序并选取目标人数 =====
            let ranked = self.sorter.sort(eligible, streak_weight, max_consecutive_days);
            let take = required_headcount.min(ranked.len());
            let selected = &ranked[..take];

            debug!(
                %date,
                %weekday,
                shift_duration,
                required_headcount,
                eligible_count = ranked.len(),
                selected_count = take,
                "当日排班完成"
            );

            // ===== 步骤8: 记录指派 (按优先级顺序,时段裁剪到偏好窗口) =====
            let selected_ids: BTreeSet<&str> =
                selected.iter().map(|(m, _)| m.id.as_str()).collect();
            let assigned_team: Vec<MemberAssignment> = selected
                .iter()
                .map(|(member, _)| MemberAssignment {
                    member_id: member.id.clone(),
                    slots: template
                        .slots
                        .iter()
                        .map(|slot| {
                            EligibilityCore::trim_to_preferred(&member.preferences, weekday, slot)
                        })
                        .collect(),
                })
                .collect();

            // ===== 步骤8-9: 状态变更: 被选扣减并累计,未被选连续天数清零 =====
            for member in roster {
                if let Some(state) = states.get_mut(&member.id) {
                    if selected_ids.contains(member.id.as_str()) {
                        state.remaining_weekly_hours -= shift_duration;
                        state.consecutive_working_days += 1;
                    } else {
                        state.consecutive_working_days = 0;
                    }
                }
            }

            // ===== 步骤10: 输出当日记录 =====
            let presence_ratio = assigned_team.len() as f64 / roster.len() as f64;
            days.push(DayAssignment {
                date,
                weekday,
                operating_slots: template.slots.clone(),
                assigned_team,
                presence_ratio,
            });
        }

        info!(days_generated = days.len(), "排班生成完成");
        Ok(days)
    }

    /// 生成完整排班方案 (带标识的外围持久化单元)
    ///
    /// # 参数
    /// - name: 方案名称
    /// - roster / calendar / window: 同 generate
    ///
    /// # 返回
    /// SchedulePlan: uuid v4 方案ID + 窗口 + 逐日记录
    pub fn generate_plan(
        &self,
        name: &str,
        roster: &[TeamMember],
        calendar: &OperatingCalendar,
        window: &SchedulingWindow,
    ) -> EngineResult<SchedulePlan> {
        let days = self.generate(roster, calendar, window)?;
        Ok(SchedulePlan {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            window: *window,
            member_ids: roster.iter().map(|m| m.id.clone()).collect(),
            days,
        })
    }

    // ==========================================
    // 输入校验
    // ==========================================

    /// 处理任何日期之前的整体校验; 失败即中止,不产生部分输出
    ///
    /// # 规则
    /// 1. 花名册非空
    /// 2. 成员ID唯一
    /// 3. 每个成员主数据有效 (配额非负、偏好窗口有效)
    /// 4. 窗口有效 (end >= start)
    /// 5. 日历完整有效 (七天在场、时段有效且互不重叠)
    fn validate_inputs(
        &self,
        roster: &[TeamMember],
        calendar: &OperatingCalendar,
        window: &SchedulingWindow,
    ) -> EngineResult<()> {
        if roster.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let mut seen_ids = BTreeSet::new();
        for member in roster {
            if !seen_ids.insert(member.id.as_str()) {
                return Err(EngineError::DuplicateMemberId(member.id.clone()));
            }
            member.validate()?;
        }

        window.validate()?;
        calendar.validate()?;

        Ok(())
    }
}
