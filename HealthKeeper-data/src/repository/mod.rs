// Repository module structure
pub mod errors;
pub mod remote;
#[cfg(any(test, feature = "mock"))]
pub mod in_memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    BloodPressureReading, DateRange, GlucoseReading, NewBloodPressureReading, NewGlucoseReading,
    SequenceNumber, Timed, DATE_COLUMN, TIME_COLUMN,
};

// Re-export commonly used types
pub use errors::RepositoryError;
pub use remote::RemoteRepository;
#[cfg(any(test, feature = "mock"))]
pub use in_memory::InMemoryRepository;

/// Column a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    Time,
}

/// One key of a listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: SortColumn,
    pub descending: bool,
}

impl SortKey {
    pub const fn desc(column: SortColumn) -> Self {
        Self { column, descending: true }
    }

    pub fn column_name(&self) -> &'static str {
        match self.column {
            SortColumn::Date => DATE_COLUMN,
            SortColumn::Time => TIME_COLUMN,
        }
    }

    fn compare<T: Timed>(&self, a: &T, b: &T) -> Ordering {
        let ordering = match self.column {
            SortColumn::Date => a.date().cmp(&b.date()),
            SortColumn::Time => a.time().cmp(&b.time()),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// A row kind living in its own table
pub trait TableRecord: Timed + Clone + Send + Sync + DeserializeOwned + 'static {
    /// Insert payload for this kind
    type New: Serialize + Clone + Send + Sync + 'static;

    /// Short name used in logs and errors
    const KIND: &'static str;

    /// Order in which range queries return rows
    const ORDER: &'static [SortKey];

    fn sequence(&self) -> SequenceNumber;

    fn from_new(new: Self::New, sequence: SequenceNumber) -> Self;
}

impl TableRecord for GlucoseReading {
    type New = NewGlucoseReading;

    const KIND: &'static str = "glucose";
    const ORDER: &'static [SortKey] = &[SortKey::desc(SortColumn::Date)];

    fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    fn from_new(new: NewGlucoseReading, sequence: SequenceNumber) -> Self {
        new.into_stored(sequence)
    }
}

impl TableRecord for BloodPressureReading {
    type New = NewBloodPressureReading;

    const KIND: &'static str = "blood pressure";
    const ORDER: &'static [SortKey] = &[
        SortKey::desc(SortColumn::Date),
        SortKey::desc(SortColumn::Time),
    ];

    fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    fn from_new(new: NewBloodPressureReading, sequence: SequenceNumber) -> Self {
        new.into_stored(sequence)
    }
}

/// Compare two rows by the listing order of their kind
pub fn compare_for_listing<T: TableRecord>(a: &T, b: &T) -> Ordering {
    T::ORDER
        .iter()
        .map(|key| key.compare(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Store operations available for every record kind
#[async_trait]
pub trait RecordRepository<T: TableRecord>: Send + Sync {
    /// Append a row and return the sequence number the store assigned
    async fn insert(&self, record: T::New) -> Result<SequenceNumber, RepositoryError>;

    /// Rows whose date lies in `range`, in the kind's listing order
    async fn query(&self, range: DateRange) -> Result<Vec<T>, RepositoryError>;

    /// Remove the row with the given sequence number
    async fn delete(&self, sequence: SequenceNumber) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arm, MeasurementPeriod};
    use chrono::{NaiveDate, NaiveTime};

    fn bp(sequence: SequenceNumber, day: u32, hour: u32) -> BloodPressureReading {
        BloodPressureReading {
            sequence,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            systolic: 130,
            diastolic: 85,
            arm: Arm::Left,
            heart_rate: 70,
            note: String::new(),
        }
    }

    #[test]
    fn test_blood_pressure_order_breaks_ties_by_time() {
        let mut rows = vec![bp(1, 1, 8), bp(2, 2, 8), bp(3, 1, 20)];
        rows.sort_by(compare_for_listing);
        let order: Vec<_> = rows.iter().map(|r| r.sequence).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_glucose_order_ignores_time() {
        let reading = |sequence, hour| GlucoseReading {
            sequence,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            period: MeasurementPeriod::BeforeLunch,
            value: 6.0,
            note: String::new(),
        };
        let a = reading(1, 8);
        let b = reading(2, 20);
        assert_eq!(compare_for_listing(&a, &b), Ordering::Equal);
    }
}
