// Row models exactly as the table store holds them
pub mod blood_pressure;
pub mod glucose;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

pub use blood_pressure::{Arm, BloodPressureReading, NewBloodPressureReading};
pub use glucose::{GlucoseReading, MeasurementPeriod, NewGlucoseReading};

/// Store-assigned identifier of a row; the only key used for deletion
pub type SequenceNumber = i64;

/// Column holding the sequence number in every table
pub const SEQUENCE_COLUMN: &str = "序号";
/// Column holding the calendar date in every table
pub const DATE_COLUMN: &str = "日期";
/// Column holding the time of day in every table
pub const TIME_COLUMN: &str = "具体时间";
/// Column holding the free-text note in every table
pub const NOTE_COLUMN: &str = "备注";

/// Inclusive calendar-date interval used to filter queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range; `None` when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A range covering a single day
    pub fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Anything taken at a date and a time of day
pub trait Timed {
    fn date(&self) -> NaiveDate;
    fn time(&self) -> NaiveTime;

    /// Date and time merged into one sortable instant
    fn timestamp(&self) -> NaiveDateTime {
        self.date().and_time(self.time())
    }
}

/// Serde adapter for `HH:MM` times
///
/// Writes hour and minute only. Reads `HH:MM` as well as `HH:MM:SS`, since a
/// time-typed column comes back with seconds.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid time of day: {}", text)))
    }

    /// Parse `HH:MM` or `HH:MM:SS`
    pub fn parse(text: &str) -> Option<NaiveTime> {
        let text = text.trim();
        NaiveTime::parse_from_str(text, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(text, FORMAT))
            .ok()
    }
}

/// Reads a null text column as an empty string
pub(crate) fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert!(DateRange::new(date("2024-06-02"), date("2024-06-01")).is_none());
        assert!(DateRange::new(date("2024-06-01"), date("2024-06-01")).is_some());
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = DateRange::new(date("2024-06-01"), date("2024-06-30")).unwrap();
        assert!(range.contains(date("2024-06-01")));
        assert!(range.contains(date("2024-06-30")));
        assert!(!range.contains(date("2024-05-31")));
        assert!(!range.contains(date("2024-07-01")));
    }

    #[test]
    fn test_clock_time_accepts_seconds() {
        assert_eq!(clock_time::parse("08:05"), NaiveTime::from_hms_opt(8, 5, 0));
        assert_eq!(clock_time::parse("20:30:00"), NaiveTime::from_hms_opt(20, 30, 0));
        assert_eq!(clock_time::parse("8 o'clock"), None);
    }
}
