// ==========================================
// 排班调度系统 - 引擎层错误类型
// ==========================================
// 职责: 定义排班引擎的校验错误类型
// 所有错误信息必须包含显式原因 (可解释性)
// 约定: 校验错误在处理任何日期之前抛出,不重试、不部分恢复
// ==========================================

use crate::domain::types::Weekday;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// 引擎层错误类型
///
/// 人员不足 (presence_ratio 低于目标) 不是错误,
/// 而是输出中可检视的正常结果
#[derive(Error, Debug)]
pub enum EngineError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    /// 花名册为空
    #[error("花名册为空: 至少需要一名成员")]
    EmptyRoster,

    /// 排班窗口无效 (end 早于 start)
    #[error("排班窗口无效: start={start}, end={end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    /// 模板缺失某个星期
    #[error("缺少排班模板: weekday={0}")]
    MissingScheduleTemplate(Weekday),

    /// 时段无效 (end 不晚于 start)
    #[error("时段无效: start={start}, end={end}")]
    InvalidSlot { start: NaiveTime, end: NaiveTime },

    /// 同一天模板内时段重叠
    #[error("时段重叠: weekday={weekday}, [{a_start}-{a_end}] 与 [{b_start}-{b_end}]")]
    OverlappingSlots {
        weekday: Weekday,
        a_start: NaiveTime,
        a_end: NaiveTime,
        b_start: NaiveTime,
        b_end: NaiveTime,
    },

    /// 营业日模板没有任何时段
    #[error("营业日模板无时段: weekday={0}")]
    EmptyDayTemplate(Weekday),

    /// 周工时配额为负
    #[error("周工时配额为负: member_id={member_id}, quota={quota}")]
    NegativeQuota { member_id: String, quota: f64 },

    /// 成员ID重复
    #[error("成员ID重复: member_id={0}")]
    DuplicateMemberId(String),

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置读取失败: {0}")]
    ConfigError(String),

    #[error("配置值无效: {key}={value}, {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
