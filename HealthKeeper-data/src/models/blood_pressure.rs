use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{clock_time, nullable_text, SequenceNumber, Timed};

/// Column holding the systolic pressure
pub const SYSTOLIC_COLUMN: &str = "高压（收缩压）mmHg";
/// Column holding the diastolic pressure
pub const DIASTOLIC_COLUMN: &str = "低压（舒张压）mmHg";
/// Column holding the arm used
pub const ARM_COLUMN: &str = "测量手臂";
/// Column holding the heart rate
pub const HEART_RATE_COLUMN: &str = "心率";

/// Canonical column order of the blood pressure table
pub const COLUMNS: [&str; 8] = [
    super::SEQUENCE_COLUMN,
    super::DATE_COLUMN,
    super::TIME_COLUMN,
    SYSTOLIC_COLUMN,
    DIASTOLIC_COLUMN,
    ARM_COLUMN,
    HEART_RATE_COLUMN,
    super::NOTE_COLUMN,
];

/// Arm the cuff was placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    #[serde(rename = "左臂", alias = "left")]
    Left,
    #[serde(rename = "右臂", alias = "right")]
    Right,
}

impl Arm {
    pub fn label(&self) -> &'static str {
        match self {
            Arm::Left => "左臂",
            Arm::Right => "右臂",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Arm::Left => "left",
            Arm::Right => "right",
        }
    }

    /// Look an arm up by label or code
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        [Arm::Left, Arm::Right]
            .into_iter()
            .find(|arm| arm.label() == text || arm.code() == text)
    }
}

impl std::fmt::Display for Arm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Storage model for a blood pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    /// Store-assigned sequence number
    #[serde(rename = "序号")]
    pub sequence: SequenceNumber,

    /// Day the reading was taken
    #[serde(rename = "日期")]
    pub date: NaiveDate,

    /// Time of day, minute precision
    #[serde(rename = "具体时间", with = "clock_time")]
    pub time: NaiveTime,

    /// Systolic blood pressure (the higher number)
    #[serde(rename = "高压（收缩压）mmHg")]
    pub systolic: i32,

    /// Diastolic blood pressure (the lower number)
    #[serde(rename = "低压（舒张压）mmHg")]
    pub diastolic: i32,

    /// Arm used for the measurement
    #[serde(rename = "测量手臂")]
    pub arm: Arm,

    /// Heart rate in beats per minute
    #[serde(rename = "心率")]
    pub heart_rate: i32,

    /// Free-text note
    #[serde(rename = "备注", default, deserialize_with = "nullable_text")]
    pub note: String,
}

/// Row payload for inserting a blood pressure reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBloodPressureReading {
    #[serde(rename = "日期")]
    pub date: NaiveDate,

    #[serde(rename = "具体时间", with = "clock_time")]
    pub time: NaiveTime,

    #[serde(rename = "高压（收缩压）mmHg")]
    pub systolic: i32,

    #[serde(rename = "低压（舒张压）mmHg")]
    pub diastolic: i32,

    #[serde(rename = "测量手臂")]
    pub arm: Arm,

    #[serde(rename = "心率")]
    pub heart_rate: i32,

    #[serde(rename = "备注", default)]
    pub note: String,
}

impl NewBloodPressureReading {
    /// The stored row once the store has assigned a sequence number
    pub fn into_stored(self, sequence: SequenceNumber) -> BloodPressureReading {
        BloodPressureReading {
            sequence,
            date: self.date,
            time: self.time,
            systolic: self.systolic,
            diastolic: self.diastolic,
            arm: self.arm,
            heart_rate: self.heart_rate,
            note: self.note,
        }
    }
}

impl Timed for BloodPressureReading {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn time(&self) -> NaiveTime {
        self.time
    }
}
