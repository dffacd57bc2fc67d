use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{clock_time, nullable_text, SequenceNumber, Timed};

/// Column holding the measurement period
pub const PERIOD_COLUMN: &str = "测量时段";
/// Column holding the glucose value
pub const VALUE_COLUMN: &str = "血糖数值(mmol/L)";

/// Canonical column order of the glucose table
pub const COLUMNS: [&str; 6] = [
    super::SEQUENCE_COLUMN,
    super::DATE_COLUMN,
    super::TIME_COLUMN,
    PERIOD_COLUMN,
    VALUE_COLUMN,
    super::NOTE_COLUMN,
];

/// When a glucose reading was taken relative to meals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeasurementPeriod {
    #[serde(rename = "早餐前（空腹）", alias = "before_breakfast")]
    BeforeBreakfast,
    #[serde(rename = "早餐后2小时", alias = "after_breakfast")]
    AfterBreakfast,
    #[serde(rename = "午餐前", alias = "before_lunch")]
    BeforeLunch,
    #[serde(rename = "午餐后2小时", alias = "after_lunch")]
    AfterLunch,
    #[serde(rename = "晚餐前", alias = "before_dinner")]
    BeforeDinner,
    #[serde(rename = "晚餐后2小时", alias = "after_dinner")]
    AfterDinner,
}

impl MeasurementPeriod {
    /// All periods in the order the entry form lists them
    pub const ALL: [MeasurementPeriod; 6] = [
        MeasurementPeriod::BeforeBreakfast,
        MeasurementPeriod::AfterBreakfast,
        MeasurementPeriod::BeforeLunch,
        MeasurementPeriod::AfterLunch,
        MeasurementPeriod::BeforeDinner,
        MeasurementPeriod::AfterDinner,
    ];

    /// Label as stored and displayed
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementPeriod::BeforeBreakfast => "早餐前（空腹）",
            MeasurementPeriod::AfterBreakfast => "早餐后2小时",
            MeasurementPeriod::BeforeLunch => "午餐前",
            MeasurementPeriod::AfterLunch => "午餐后2小时",
            MeasurementPeriod::BeforeDinner => "晚餐前",
            MeasurementPeriod::AfterDinner => "晚餐后2小时",
        }
    }

    /// Short English code accepted as an alias
    pub fn code(&self) -> &'static str {
        match self {
            MeasurementPeriod::BeforeBreakfast => "before_breakfast",
            MeasurementPeriod::AfterBreakfast => "after_breakfast",
            MeasurementPeriod::BeforeLunch => "before_lunch",
            MeasurementPeriod::AfterLunch => "after_lunch",
            MeasurementPeriod::BeforeDinner => "before_dinner",
            MeasurementPeriod::AfterDinner => "after_dinner",
        }
    }

    /// Look a period up by label or code
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|period| period.label() == text || period.code() == text)
    }
}

impl std::fmt::Display for MeasurementPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage model for a glucose reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    /// Store-assigned sequence number
    #[serde(rename = "序号")]
    pub sequence: SequenceNumber,

    /// Day the reading was taken
    #[serde(rename = "日期")]
    pub date: NaiveDate,

    /// Time of day, minute precision
    #[serde(rename = "具体时间", with = "clock_time")]
    pub time: NaiveTime,

    /// Meal-relative slot
    #[serde(rename = "测量时段")]
    pub period: MeasurementPeriod,

    /// Glucose value in mmol/L
    #[serde(rename = "血糖数值(mmol/L)")]
    pub value: f64,

    /// Free-text note
    #[serde(rename = "备注", default, deserialize_with = "nullable_text")]
    pub note: String,
}

/// Row payload for inserting a glucose reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGlucoseReading {
    #[serde(rename = "日期")]
    pub date: NaiveDate,

    #[serde(rename = "具体时间", with = "clock_time")]
    pub time: NaiveTime,

    #[serde(rename = "测量时段")]
    pub period: MeasurementPeriod,

    #[serde(rename = "血糖数值(mmol/L)")]
    pub value: f64,

    #[serde(rename = "备注", default)]
    pub note: String,
}

impl NewGlucoseReading {
    /// The stored row once the store has assigned a sequence number
    pub fn into_stored(self, sequence: SequenceNumber) -> GlucoseReading {
        GlucoseReading {
            sequence,
            date: self.date,
            time: self.time,
            period: self.period,
            value: self.value,
            note: self.note,
        }
    }
}

impl Timed for GlucoseReading {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> NaiveTime {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_round_trips_with_stored_column_names() {
        let row = json!({
            "序号": 3,
            "日期": "2024-06-01",
            "具体时间": "08:00:00",
            "测量时段": "早餐前（空腹）",
            "血糖数值(mmol/L)": 7.2,
            "备注": null,
            "created_at": "2024-06-01T00:00:00+00:00"
        });

        let reading: GlucoseReading = serde_json::from_value(row).unwrap();
        assert_eq!(reading.sequence, 3);
        assert_eq!(reading.period, MeasurementPeriod::BeforeBreakfast);
        assert_eq!(reading.note, "");

        let written = serde_json::to_value(&reading).unwrap();
        assert_eq!(written["具体时间"], "08:00");
        assert_eq!(written["测量时段"], "早餐前（空腹）");
    }

    #[test]
    fn test_period_codes_are_accepted() {
        let period: MeasurementPeriod = serde_json::from_value(json!("after_dinner")).unwrap();
        assert_eq!(period, MeasurementPeriod::AfterDinner);
        assert_eq!(MeasurementPeriod::parse("午餐前"), Some(MeasurementPeriod::BeforeLunch));
        assert_eq!(MeasurementPeriod::parse("宵夜"), None);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        let result: Result<MeasurementPeriod, _> = serde_json::from_value(json!("宵夜"));
        assert!(result.is_err());
    }
}
