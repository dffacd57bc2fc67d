use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use health_keeper_data::models::{clock_time, DateRange};
use health_keeper_domain::entities::DEFAULT_NOTE;
use health_keeper_domain::services::date_range::describe;
use health_keeper_domain::services::{DeleteOutcome, ServiceError};

/// Date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format used for chart points
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Range selection shared by every read endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// `7`, `30`, `60` or `custom` (default: 30)
    pub range: Option<String>,

    /// YYYY-MM-DD, custom only (default: 60 days ago)
    pub start_date: Option<String>,

    /// YYYY-MM-DD, custom only (default: today)
    pub end_date: Option<String>,
}

/// Whether a payload carries any readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    Ok,
    NoData,
}

impl DataStatus {
    pub fn of(empty: bool) -> Self {
        if empty {
            DataStatus::NoData
        } else {
            DataStatus::Ok
        }
    }
}

/// Resolved range echoed back with every read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RangeView {
    pub start: String,
    pub end: String,
    /// Caption for the table header
    pub description: String,
}

impl From<&DateRange> for RangeView {
    fn from(range: &DateRange) -> Self {
        Self {
            start: range.start().format(DATE_FORMAT).to_string(),
            end: range.end().format(DATE_FORMAT).to_string(),
            description: describe(range),
        }
    }
}

/// Response to a successful insert
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// Sequence number assigned by the store
    pub sequence: i64,
}

/// Response to a delete request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    /// `skipped` when the placeholder was submitted, otherwise `deleted`
    pub outcome: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
}

impl From<DeleteOutcome> for DeleteResponse {
    fn from(outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Skipped => Self {
                outcome: "skipped".to_string(),
                sequence: None,
            },
            DeleteOutcome::Deleted(sequence) => Self {
                outcome: "deleted".to_string(),
                sequence: Some(sequence),
            },
        }
    }
}

/// Parse a `YYYY-MM-DD` date, naming the field on failure
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ServiceError::Validation(format!("{}: 日期格式应为 YYYY-MM-DD", field)))
}

/// Date and time of a submitted entry; missing parts fall back to `now`
pub fn entry_moment(
    date: Option<&str>,
    time: Option<&str>,
    now: NaiveDateTime,
) -> Result<(NaiveDate, NaiveTime), ServiceError> {
    let date = match date {
        Some(value) => parse_date("date", value)?,
        None => now.date(),
    };
    let time = match time {
        Some(value) => clock_time::parse(value)
            .ok_or_else(|| ServiceError::Validation("time: 时间格式应为 HH:MM".to_string()))?,
        None => now.time(),
    };
    Ok((date, time))
}

/// Submitted note, or the default when omitted
pub fn entry_note(note: Option<String>) -> String {
    note.unwrap_or_else(|| DEFAULT_NOTE.to_string())
}
