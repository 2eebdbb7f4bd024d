// ==========================================
// 排班调度系统 - 核心库
// ==========================================
// 系统定位: 班次自动分配引擎 (确定性单遍计算)
// 外围职责 (持久化/认证/表单/导出) 均由调用方承担
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值类型与实体
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 可调参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::Weekday;

// 领域实体
pub use domain::{
    DayAssignment, DayTemplate, MemberAssignment, MemberPreferences, MemberScheduleState,
    OperatingCalendar, SchedulePlan, SchedulingWindow, TeamMember, TimeSlot,
};

// 引擎
pub use engine::{
    AllocationEngine, EligibilityCore, EligibilityEngine, PlanSummaryEngine, PrioritySorter,
    ScheduleValidator, StaffingTargetEngine,
};

// 错误与报表
pub use engine::{EngineError, EngineResult};
pub use engine::{MemberLoad, PlanSummary, ValidationViolation, ViolationKind};

// 配置
pub use config::{ScheduleConfigManager, ScheduleConfigReader};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "排班调度系统";
