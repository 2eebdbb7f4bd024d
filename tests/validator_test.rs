// ==========================================
// 排班校验引擎集成测试
// ==========================================
// 职责: 验证校验引擎与分配引擎的一致性,
//       以及对人为篡改记录的检出能力
// ==========================================


use shift_planning_engine::{
    AllocationEngine, MemberAssignment, ScheduleConfigManager, ScheduleValidator, TimeSlot,
    ViolationKind, Weekday,
};
use std::sync::Arc;
use test_helpers::{
    create_member_with_rest_days, create_test_member, standard_calendar, window_from_monday,
};

fn engine() -> AllocationEngine<ScheduleConfigManager> {
    AllocationEngine::new(Arc::new(ScheduleConfigManager::new()))
}

fn validator() -> ScheduleValidator<ScheduleConfigManager> {
    ScheduleValidator::new(Arc::new(ScheduleConfigManager::new()))
}

#[test]
fn test_generated_schedule_has_no_violations() {
    // 混合配额 + 休息日偏好, 4 周窗口
    let roster = vec![
        create_member_with_rest_days("M001", 35.0, &[Weekday::Monday]),
        create_member_with_rest_days("M002", 20.0, &[Weekday::Saturday]),
        create_test_member("M003", 35.0),
        create_test_member("M004", 10.0),
        create_test_member("M005", 40.0),
    ];
    let calendar = standard_calendar();
    let window = window_from_monday(28);

    let days = engine().generate(&roster, &calendar, &window).unwrap();
    let violations = validator().validate(&days, &roster, &calendar).unwrap();

    assert!(violations.is_empty(), "生成结果不应有违规: {:?}", violations);
}

#[test]
fn test_tampered_closed_day_detected() {
    let roster = vec![create_test_member("M001", 35.0)];
    let calendar = standard_calendar();
    let window = window_from_monday(7);

    let mut days = engine().generate(&roster, &calendar, &window).unwrap();

    // 往周日 (闭店) 塞入一名成员
    let sunday = &mut days[6];
    assert!(sunday.is_closed());
    sunday.assigned_team.push(MemberAssignment {
        member_id: "M001".to_string(),
        slots: vec![TimeSlot::from_hm(9, 0, 17, 0).unwrap()],
    });
    sunday.presence_ratio = 1.0;

    let violations = validator().validate(&days, &roster, &calendar).unwrap();
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::ClosedDayStaffed));
}

#[test]
fn test_tampered_rest_day_detected() {
    let roster = vec![
        create_member_with_rest_days("M001", 35.0, &[Weekday::Monday]),
        create_test_member("M002", 35.0),
        create_test_member("M003", 35.0),
    ];
    let calendar = standard_calendar();
    let window = window_from_monday(7);

    let mut days = engine().generate(&roster, &calendar, &window).unwrap();

    // 把 M001 强塞进周一
    assert!(!days[0].contains_member("M001"));
    let m001_slots = days[0].operating_slots.clone();
    days[0].assigned_team.push(MemberAssignment {
        member_id: "M001".to_string(),
        slots: m001_slots,
    });

    let violations = validator().validate(&days, &roster, &calendar).unwrap();
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::RestDayAssigned
            && v.member_id.as_deref() == Some("M001")));
    // 人数也随之偏离 min(目标, 可排)
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::HeadcountMismatch));
}

#[test]
fn test_tampered_missing_member_detected() {
    let roster = vec![
        create_test_member("M001", 35.0),
        create_test_member("M002", 35.0),
        create_test_member("M003", 35.0),
    ];
    let calendar = standard_calendar();
    let window = window_from_monday(1);

    let mut days = engine().generate(&roster, &calendar, &window).unwrap();

    // 删掉一名在班成员 → 人数低于 min(目标, 可排)
    assert_eq!(days[0].assigned_team.len(), 3);
    days[0].assigned_team.pop();

    let violations = validator().validate(&days, &roster, &calendar).unwrap();
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::HeadcountMismatch));
}

#[test]
fn test_validator_reports_are_serializable() {
    let roster = vec![create_test_member("M001", 35.0)];
    let calendar = standard_calendar();
    let window = window_from_monday(7);

    let mut days = engine().generate(&roster, &calendar, &window).unwrap();
    days[6].assigned_team.push(MemberAssignment {
        member_id: "M001".to_string(),
        slots: vec![TimeSlot::from_hm(9, 0, 17, 0).unwrap()],
    });

    let violations = validator().validate(&days, &roster, &calendar).unwrap();
    assert!(!violations.is_empty());

    // 审计记录可直接序列化交外围应用展示
    let json = serde_json::to_string(&violations).unwrap();
    assert!(json.contains("CLOSED_DAY_STAFFED"));
}
