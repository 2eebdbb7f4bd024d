// ==========================================
// 排班调度系统 - 营业时间日历领域模型
// ==========================================
// 职责: 按星期维护"闭店"或"一组有序时段"的模板,按日期解析
// 约定: 模板由外部配置层提供,引擎只做快速失败校验,不做修复
// ==========================================

use crate::domain::timeslot::TimeSlot;
use crate::domain::types::Weekday;
use crate::engine::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DayTemplate - 单日营业模板
// ==========================================
// closed=true 时当日无任何时段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub closed: bool,         // 闭店标记
    pub slots: Vec<TimeSlot>, // 营业时段 (有序、互不重叠)
}

impl DayTemplate {
    /// 创建营业日模板
    pub fn open(slots: Vec<TimeSlot>) -> Self {
        Self {
            closed: false,
            slots,
        }
    }

    /// 创建闭店日模板
    pub fn closed_day() -> Self {
        Self {
            closed: true,
            slots: Vec::new(),
        }
    }

    /// 当日总营业时长 (小时)
    ///
    /// 闭店日为 0
    pub fn total_hours(&self) -> f64 {
        if self.closed {
            return 0.0;
        }
        self.slots.iter().map(TimeSlot::duration_hours).sum()
    }

    /// 校验模板结构
    ///
    /// # 规则
    /// 1. 闭店日直接通过
    /// 2. 营业日必须至少有一个时段
    /// 3. 每个时段必须有效 (end > start)
    /// 4. 时段两两不重叠
    pub fn validate(&self, weekday: Weekday) -> EngineResult<()> {
        if self.closed {
            return Ok(());
        }

        if self.slots.is_empty() {
            return Err(EngineError::EmptyDayTemplate(weekday));
        }

        for slot in &self.slots {
            slot.validate()?;
        }

        for (i, a) in self.slots.iter().enumerate() {
            for b in self.slots.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(EngineError::OverlappingSlots {
                        weekday,
                        a_start: a.start,
                        a_end: a.end,
                        b_start: b.start,
                        b_end: b.end,
                    });
                }
            }
        }

        Ok(())
    }
}

// ==========================================
// OperatingCalendar - 按星期的营业日历
// ==========================================
// 纯查表,无副作用; 缺失星期视为配置错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCalendar {
    templates: BTreeMap<Weekday, DayTemplate>,
}

impl OperatingCalendar {
    /// 从模板映射创建日历
    pub fn new(templates: BTreeMap<Weekday, DayTemplate>) -> Self {
        Self { templates }
    }

    /// 空日历 (逐日 insert 构建)
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// 设置某个星期的模板
    pub fn insert(&mut self, weekday: Weekday, template: DayTemplate) {
        self.templates.insert(weekday, template);
    }

    /// 按星期查表
    ///
    /// # 返回
    /// - Err(MissingScheduleTemplate): 该星期未配置 (调用方配置错误,不重试)
    pub fn resolve_weekday(&self, weekday: Weekday) -> EngineResult<&DayTemplate> {
        self.templates
            .get(&weekday)
            .ok_or(EngineError::MissingScheduleTemplate(weekday))
    }

    /// 按日期解析当日模板
    ///
    /// # 参数
    /// - date: 日历日期
    ///
    /// # 返回
    /// 该日期对应星期的模板条目
    pub fn resolve(&self, date: NaiveDate) -> EngineResult<&DayTemplate> {
        self.resolve_weekday(Weekday::from_date(date))
    }

    /// 校验整个日历
    ///
    /// # 规则
    /// 1. 七个星期全部在场
    /// 2. 每个模板自身有效 (时段有效且互不重叠)
    pub fn validate(&self) -> EngineResult<()> {
        for weekday in Weekday::ALL {
            let template = self.resolve_weekday(weekday)?;
            template.validate(weekday)?;
        }
        Ok(())
    }
}

impl Default for OperatingCalendar {
    /// 默认营业时间
    ///
    /// 周一至周六 08:30-20:15, 周日 08:45-12:30, 无闭店日
    fn default() -> Self {
        let full_day = TimeSlot::from_hm(8, 30, 20, 15).expect("默认时段有效");
        let sunday_morning = TimeSlot::from_hm(8, 45, 12, 30).expect("默认时段有效");

        let mut templates = BTreeMap::new();
        for weekday in Weekday::ALL {
            let template = match weekday {
                Weekday::Sunday => DayTemplate::open(vec![sunday_morning]),
                _ => DayTemplate::open(vec![full_day]),
            };
            templates.insert(weekday, template);
        }
        Self { templates }
    }
}
