use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use health_keeper_data::models::{clock_time, MeasurementPeriod};

/// Glucose reading as entered on the form, before it is stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GlucoseEntry {
    /// Day the reading was taken
    pub date: NaiveDate,

    /// Time of day; seconds are dropped when stored
    #[serde(with = "clock_time")]
    pub time: NaiveTime,

    /// Meal-relative slot
    pub period: MeasurementPeriod,

    /// Glucose value in mmol/L
    #[validate(range(min = 0.0, max = 30.0, message = "血糖数值必须在 0 到 30 mmol/L 之间"))]
    pub value: f64,

    /// Free-text note
    #[validate(length(max = 500, message = "备注不能超过 500 个字符"))]
    pub note: String,
}
