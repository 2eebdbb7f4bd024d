// ==========================================
// 排班调度系统 - 团队成员领域模型
// ==========================================
// 职责: 成员主数据 (合同工时、偏好) 与引擎私有的排班状态
// 约定: 成员主数据在一次生成调用期间只读,由调用方持有
// ==========================================

use crate::domain::timeslot::TimeSlot;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// MemberPreferences - 成员排班偏好
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberPreferences {
    /// 休息日偏好: 这些星期不应被排班
    #[serde(default)]
    pub rest_days: BTreeSet<Weekday>,

    /// 按星期的可接受时段窗口
    /// 某星期存在条目时,当日全部营业时段必须落入其中某个窗口
    /// 不存在条目时对该星期无约束
    #[serde(default)]
    pub preferred_windows: BTreeMap<Weekday, Vec<TimeSlot>>,
}

impl MemberPreferences {
    /// 判断某星期是否为休息日
    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.rest_days.contains(&weekday)
    }

    /// 取某星期的偏好窗口 (无条目时返回 None)
    pub fn windows_for(&self, weekday: Weekday) -> Option<&[TimeSlot]> {
        self.preferred_windows.get(&weekday).map(Vec::as_slice)
    }
}

// ==========================================
// TeamMember - 团队成员主数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    // ===== 标识 =====
    pub id: String,   // 唯一稳定标识
    pub name: String, // 姓名 (引擎不读,外围应用展示用)
    pub role: String, // 岗位 (引擎不读,外围应用展示用)

    // ===== 合同 =====
    pub weekly_hour_quota: f64, // 每周合同工时 (>= 0)

    // ===== 偏好 =====
    #[serde(default)]
    pub preferences: MemberPreferences,
}

impl TeamMember {
    /// 校验成员主数据
    ///
    /// # 规则
    /// - weekly_hour_quota >= 0, 否则 NegativeQuota
    /// - 偏好窗口中的每个时段必须有效
    pub fn validate(&self) -> EngineResult<()> {
        if self.weekly_hour_quota < 0.0 {
            return Err(EngineError::NegativeQuota {
                member_id: self.id.clone(),
                quota: self.weekly_hour_quota,
            });
        }

        for windows in self.preferences.preferred_windows.values() {
            for window in windows {
                window.validate()?;
            }
        }

        Ok(())
    }
}

// ==========================================
// MemberScheduleState - 成员排班状态
// ==========================================
// 引擎私有: 在一次生成调用开始时创建,逐日变更,调用结束即弃
// 不跨调用共享,不由引擎持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberScheduleState {
    /// 本 7 日块剩余可排工时
    /// 每个以窗口起始日为基准的 7 日块开始时重置为 weekly_hour_quota
    pub remaining_weekly_hours: f64,

    /// 连续工作天数
    /// 被选中当日 +1; 第一个未被选中的营业日清零; 闭店日不变
    pub consecutive_working_days: u32,
}

impl MemberScheduleState {
    /// 按成员配额初始化状态
    pub fn new(member: &TeamMember) -> Self {
        Self {
            remaining_weekly_hours: member.weekly_hour_quota,
            consecutive_working_days: 0,
        }
    }

    /// 周界重置: 只重置工时,连续天数跨周保留
    pub fn reset_weekly_hours(&mut self, quota: f64) {
        self.remaining_weekly_hours = quota;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_member(id: &str, quota: f64) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: format!("成员{}", id),
            role: "销售".to_string(),
            weekly_hour_quota: quota,
            preferences: MemberPreferences::default(),
        }
    }

    #[test]
    fn test_validate_accepts_zero_quota() {
        let member = create_test_member("M001", 0.0);
        assert!(member.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_quota() {
        let member = create_test_member("M002", -1.0);
        let result = member.validate();
        match result {
            Err(EngineError::NegativeQuota { member_id, quota }) => {
                assert_eq!(member_id, "M002");
                assert_eq!(quota, -1.0);
            }
            _ => panic!("Expected NegativeQuota"),
        }
    }

    #[test]
    fn test_validate_rejects_invalid_preferred_window() {
        let mut member = create_test_member("M003", 35.0);
        member.preferences.preferred_windows.insert(
            Weekday::Monday,
            vec![TimeSlot {
                start: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                end: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            }],
        );
        assert!(matches!(
            member.validate(),
            Err(EngineError::InvalidSlot { .. })
        ));
    }

    #[test]
    fn test_rest_day_lookup() {
        let mut member = create_test_member("M004", 35.0);
        member.preferences.rest_days.insert(Weekday::Monday);

        assert!(member.preferences.is_rest_day(Weekday::Monday));
        assert!(!member.preferences.is_rest_day(Weekday::Tuesday));
    }

    #[test]
    fn test_state_lifecycle() {
        let member = create_test_member("M005", 35.0);
        let mut state = MemberScheduleState::new(&member);
        assert_eq!(state.remaining_weekly_hours, 35.0);
        assert_eq!(state.consecutive_working_days, 0);

        state.remaining_weekly_hours -= 8.0;
        state.consecutive_working_days = 3;

        // 周界只重置工时,连续天数保留
        state.reset_weekly_hours(member.weekly_hour_quota);
        assert_eq!(state.remaining_weekly_hours, 35.0);
        assert_eq!(state.consecutive_working_days, 3);
    }
}
