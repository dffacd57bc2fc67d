use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use health_keeper_data::models::{clock_time, Arm};

/// Blood pressure reading as entered on the form, before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BloodPressureEntry {
    pub date: NaiveDate,

    #[serde(with = "clock_time")]
    pub time: NaiveTime,

    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 300, message = "高压必须在 40 到 300 mmHg 之间"))]
    pub systolic: i32,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 20, max = 200, message = "低压必须在 20 到 200 mmHg 之间"))]
    pub diastolic: i32,

    pub arm: Arm,

    /// Heart rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "心率必须在 20 到 250 之间"))]
    pub heart_rate: i32,

    #[validate(length(max = 500, message = "备注不能超过 500 个字符"))]
    pub note: String,
}
