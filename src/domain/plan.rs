// ==========================================
// 排班调度系统 - 排班计划领域模型
// ==========================================
// 职责: 排班窗口与引擎输出记录 (逐日指派)
// 约定: 输出按日期有序,交由外部文档存储持久化、外部报表导出
// ==========================================

use crate::domain::timeslot::TimeSlot;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// SchedulingWindow - 排班窗口
// ==========================================
// 闭区间 [start, end], 7日块以 start 为基准切分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SchedulingWindow {
    /// 创建排班窗口,校验 end >= start
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// 校验窗口有效性
    pub fn validate(&self) -> EngineResult<()> {
        if self.end < self.start {
            return Err(EngineError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// 窗口覆盖的天数 (含两端)
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// 按时间顺序迭代窗口内全部日期
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let count = self.num_days();
        (0..count).map(move |offset| start + Duration::days(offset))
    }

    /// 某日期所属的 7 日块序号 (0 起,以窗口起始日为基准)
    pub fn block_index(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days() / 7
    }
}

// ==========================================
// MemberAssignment - 单日单成员指派
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAssignment {
    pub member_id: String,    // 成员ID
    pub slots: Vec<TimeSlot>, // 当日实际指派时段 (通常等于营业时段)
}

// ==========================================
// DayAssignment - 单日排班记录
// ==========================================
// 引擎输出,窗口内每个日期恰好一条
// 不变式: operating_slots 为空时 assigned_team 为空且 presence_ratio = 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub date: NaiveDate,                     // 日期
    pub weekday: Weekday,                    // 星期
    pub operating_slots: Vec<TimeSlot>,      // 当日营业时段 (闭店为空)
    pub assigned_team: Vec<MemberAssignment>, // 当日在班成员及其时段
    pub presence_ratio: f64,                 // 出勤率 = |assigned_team| / |roster|
}

impl DayAssignment {
    /// 构造闭店日记录
    pub fn closed_day(date: NaiveDate, weekday: Weekday) -> Self {
        Self {
            date,
            weekday,
            operating_slots: Vec::new(),
            assigned_team: Vec::new(),
            presence_ratio: 0.0,
        }
    }

    /// 当日是否闭店
    pub fn is_closed(&self) -> bool {
        self.operating_slots.is_empty()
    }

    /// 某成员当日是否在班
    pub fn contains_member(&self, member_id: &str) -> bool {
        self.assigned_team.iter().any(|a| a.member_id == member_id)
    }
}

// ==========================================
// SchedulePlan - 排班方案
// ==========================================
// 外围应用持久化的完整方案: 标识 + 窗口 + 逐日记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePlan {
    pub id: String,              // 方案ID (uuid v4)
    pub name: String,            // 方案名称
    pub window: SchedulingWindow, // 排班窗口
    pub member_ids: Vec<String>, // 参与成员ID (按花名册顺序)
    pub days: Vec<DayAssignment>, // 逐日记录,按日期有序
}
