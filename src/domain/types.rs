// ==========================================
// 排班调度系统 - 领域类型定义
// ==========================================
// 职责: 定义排班域的基础枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 星期 (Weekday)
// ==========================================
// 排班模板、休息日偏好、出勤率目标均以星期为键
// 序列化格式: SCREAMING_SNAKE_CASE (与文档存储一致)
// Ord 顺序: Monday < ... < Sunday (保证 BTreeMap 遍历确定性)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// 一周七天,按 Monday..Sunday 顺序
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 从日历日期推导星期
    ///
    /// # 参数
    /// - date: 日历日期
    ///
    /// # 返回
    /// 对应的 Weekday
    pub fn from_date(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;

        match date.weekday() {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weekday::Monday => write!(f, "MONDAY"),
            Weekday::Tuesday => write!(f, "TUESDAY"),
            Weekday::Wednesday => write!(f, "WEDNESDAY"),
            Weekday::Thursday => write!(f, "THURSDAY"),
            Weekday::Friday => write!(f, "FRIDAY"),
            Weekday::Saturday => write!(f, "SATURDAY"),
            Weekday::Sunday => write!(f, "SUNDAY"),
        }
    }
}
