// ==========================================
// 排班调度系统 - 领域层
// ==========================================
// 职责: 值类型与实体定义,不含业务规则
// ==========================================

pub mod calendar;
pub mod member;
pub mod plan;
pub mod timeslot;
pub mod types;

// 重导出核心领域类型
pub use calendar::{DayTemplate, OperatingCalendar};
pub use member::{MemberPreferences, MemberScheduleState, TeamMember};
pub use plan::{DayAssignment, MemberAssignment, SchedulePlan, SchedulingWindow};
pub use timeslot::TimeSlot;
pub use types::Weekday;
