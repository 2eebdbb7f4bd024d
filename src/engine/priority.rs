// ==========================================
// 排班调度系统 - 候选排序引擎
// ==========================================
// 职责: 对当日可排成员按优先级得分排序
// 输入: 可排成员及其排班状态快照
// 输出: 排序后的候选列表 (优先级从高到低)
// 约定: 得分并列时按成员ID升序,保证输出可复现
// ==========================================

use crate::domain::member::{MemberScheduleState, TeamMember};
use std::cmp::Ordering;

// ==========================================
// PrioritySorter - 候选排序引擎
// ==========================================
pub struct PrioritySorter {
    // 无状态引擎,不需要注入依赖
}

impl PrioritySorter {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 PrioritySorter 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算成员优先级得分
    ///
    /// # 规则
    /// - score = remaining_weekly_hours
    ///   + streak_weight * (max_consecutive_days - consecutive_working_days)
    ///
    /// 剩余工时多、连续天数少的成员优先
    pub fn priority_score(
        &self,
        state: &MemberScheduleState,
        streak_weight: f64,
        max_consecutive_days: u32,
    ) -> f64 {
        let slack = max_consecutive_days as f64 - state.consecutive_working_days as f64;
        state.remaining_weekly_hours + streak_weight * slack
    }

    /// 排序候选列表
    ///
    /// 排序键:
    /// 1) 优先级得分降序
    /// 2) 成员ID升序 (显式、稳定、确定性的次键)
    ///
    /// # 参数
    /// - candidates: 候选成员及其状态快照
    /// - streak_weight: 连续天数权重
    /// - max_consecutive_days: 连续天数上限
    ///
    /// # 返回
    /// 排序后的候选列表 (优先级从高到低)
    pub fn sort<'a>(
        &self,
        mut candidates: Vec<(&'a TeamMember, MemberScheduleState)>,
        streak_weight: f64,
        max_consecutive_days: u32,
    ) -> Vec<(&'a TeamMember, MemberScheduleState)> {
        candidates.sort_by(|a, b| self.compare(a, b, streak_weight, max_consecutive_days));
        candidates
    }

    // ==========================================
    // 比较方法
    // ==========================================

    /// 比较两个候选的优先级
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    fn compare(
        &self,
        a: &(&TeamMember, MemberScheduleState),
        b: &(&TeamMember, MemberScheduleState),
        streak_weight: f64,
        max_consecutive_days: u32,
    ) -> Ordering {
        let score_a = self.priority_score(&a.1, streak_weight, max_consecutive_days);
        let score_b = self.priority_score(&b.1, streak_weight, max_consecutive_days);

        // 1. 得分降序 (输入已校验,得分必为有限数)
        match score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 成员ID升序
        a.0.id.cmp(&b.0.id)
    }

    /// 生成排序原因 (可解释性)
    ///
    /// # 返回
    /// JSON 格式的排序原因字符串
    pub fn generate_rank_reason(
        &self,
        member: &TeamMember,
        state: &MemberScheduleState,
        streak_weight: f64,
        max_consecutive_days: u32,
    ) -> String {
        format!(
            r#"{{"member_id":"{}","score":{},"remaining_weekly_hours":{},"consecutive_working_days":{},"streak_weight":{},"max_consecutive_days":{},"tiebreak":"member_id_asc"}}"#,
            member.id,
            self.priority_score(state, streak_weight, max_consecutive_days),
            state.remaining_weekly_hours,
            state.consecutive_working_days,
            streak_weight,
            max_consecutive_days,
        )
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PrioritySorter {
    fn default() -> Self {
        Self::new()
    }
}
