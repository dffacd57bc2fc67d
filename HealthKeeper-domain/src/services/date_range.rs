//! Turns a range selection into a concrete inclusive date interval
//!
//! "Today" is always taken in China Standard Time so that the boundaries do
//! not move with the clock of whichever machine serves the request. It is
//! recomputed on every resolution; nothing here is cached.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use health_keeper_data::models::DateRange;

use super::errors::ServiceError;

/// Zone every "today" is anchored to
pub const CHINA_TZ: Tz = chrono_tz::Asia::Shanghai;

/// Days the custom selection reaches back when no start is given
const CUSTOM_DEFAULT_DAYS: i64 = 60;

/// Message shown when the custom bounds are inverted
pub const INVERTED_RANGE_MESSAGE: &str = "起始日期不能晚于结束日期";

/// Named "last N days" choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePreset {
    #[serde(rename = "7")]
    Last7Days,
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "60")]
    Last60Days,
}

impl RangePreset {
    pub fn days(&self) -> i64 {
        match self {
            RangePreset::Last7Days => 7,
            RangePreset::Last30Days => 30,
            RangePreset::Last60Days => 60,
        }
    }
}

/// What the user picked in the range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelection {
    Preset(RangePreset),
    /// Explicit bounds; a missing bound falls back to the form default
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Default for RangeSelection {
    fn default() -> Self {
        RangeSelection::Preset(RangePreset::Last30Days)
    }
}

/// Calendar date in China at the instant `now`
pub fn today_in_china(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&CHINA_TZ).date_naive()
}

/// Current wall-clock date and time in China
pub fn now_in_china() -> NaiveDateTime {
    Utc::now().with_timezone(&CHINA_TZ).naive_local()
}

/// Resolve a selection against a given "today"
pub fn resolve(selection: RangeSelection, today: NaiveDate) -> Result<DateRange, ServiceError> {
    let (start, end) = match selection {
        RangeSelection::Preset(preset) => (today - Duration::days(preset.days()), today),
        RangeSelection::Custom { start, end } => (
            start.unwrap_or(today - Duration::days(CUSTOM_DEFAULT_DAYS)),
            end.unwrap_or(today),
        ),
    };

    match DateRange::new(start, end) {
        Some(range) => {
            debug!("Resolved {:?} to {} .. {}", selection, start, end);
            Ok(range)
        }
        None => {
            warn!("Rejected inverted date range {} .. {}", start, end);
            Err(ServiceError::Validation(INVERTED_RANGE_MESSAGE.to_string()))
        }
    }
}

/// Resolve a selection against the current date in China
pub fn resolve_now(selection: RangeSelection) -> Result<DateRange, ServiceError> {
    resolve(selection, today_in_china(Utc::now()))
}

/// Caption describing which records are on screen
pub fn describe(range: &DateRange) -> String {
    format!("当前显示：{} 至 {} 的记录", range.start(), range.end())
}
