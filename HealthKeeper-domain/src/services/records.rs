//! Query & filter layer shared by both record kinds
//!
//! Every read goes straight to the repository; a mutation is visible to the
//! next `list` because nothing is cached in between.

use std::marker::PhantomData;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use health_keeper_data::models::{DateRange, SequenceNumber};
use health_keeper_data::repository::{RecordRepository, TableRecord};

use super::errors::ServiceError;

/// Placeholder offered first in the delete picker
pub const DELETE_PLACEHOLDER: &str = "请选择";

/// Records of one kind inside a resolved range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSet<T> {
    pub range: DateRange,
    pub records: Vec<T>,
}

impl<T: TableRecord> RecordSet<T> {
    /// No records in range; callers show their "no data" state
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Choices for the delete picker: the placeholder, then every sequence number shown
    pub fn delete_choices(&self) -> Vec<String> {
        std::iter::once(DELETE_PLACEHOLDER.to_string())
            .chain(self.records.iter().map(|r| r.sequence().to_string()))
            .collect()
    }
}

/// A value picked in the delete picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteSelection {
    /// Nothing picked yet
    Placeholder,
    Sequence(SequenceNumber),
}

impl FromStr for DeleteSelection {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value == DELETE_PLACEHOLDER {
            return Ok(DeleteSelection::Placeholder);
        }
        value
            .parse::<SequenceNumber>()
            .map(DeleteSelection::Sequence)
            .map_err(|_| ServiceError::Validation(format!("无效的记录序号: {}", value)))
    }
}

/// What a delete request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The placeholder was submitted; nothing was sent to the store
    Skipped,
    Deleted(SequenceNumber),
}

/// Insert, list and delete for one record kind
pub struct RecordBook<T, R> {
    repository: R,
    _record: PhantomData<fn() -> T>,
}

impl<T, R> RecordBook<T, R>
where
    T: TableRecord,
    R: RecordRepository<T>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _record: PhantomData,
        }
    }

    /// Append a record
    pub async fn add(&self, record: T::New) -> Result<SequenceNumber, ServiceError> {
        let sequence = self.repository.insert(record).await?;
        info!("Recorded {} reading #{}", T::KIND, sequence);
        Ok(sequence)
    }

    /// Records dated inside `range`, in listing order; may be empty
    pub async fn list(&self, range: DateRange) -> Result<RecordSet<T>, ServiceError> {
        let records = self.repository.query(range).await?;
        debug!("Listed {} {} readings", records.len(), T::KIND);
        Ok(RecordSet { range, records })
    }

    /// Delete the picked record; the placeholder is a no-op
    pub async fn remove(&self, selection: DeleteSelection) -> Result<DeleteOutcome, ServiceError> {
        match selection {
            DeleteSelection::Placeholder => {
                debug!("Delete requested without a selection; skipping");
                Ok(DeleteOutcome::Skipped)
            }
            DeleteSelection::Sequence(sequence) => {
                self.repository.delete(sequence).await?;
                info!("Deleted {} reading #{}", T::KIND, sequence);
                Ok(DeleteOutcome::Deleted(sequence))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use health_keeper_data::models::{
        Arm, BloodPressureReading, GlucoseReading, MeasurementPeriod, NewBloodPressureReading,
        NewGlucoseReading,
    };
    use health_keeper_data::repository::InMemoryRepository;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn glucose(day: u32, value: f64) -> NewGlucoseReading {
        NewGlucoseReading {
            date: date(day),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            period: MeasurementPeriod::BeforeBreakfast,
            value,
            note: "状态良好".to_string(),
        }
    }

    fn blood_pressure(hour: u32) -> NewBloodPressureReading {
        NewBloodPressureReading {
            date: date(1),
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            systolic: 150,
            diastolic: 90,
            arm: Arm::Right,
            heart_rate: 78,
            note: String::new(),
        }
    }

    #[test]
    fn test_delete_selection_parsing() {
        assert_eq!("请选择".parse::<DeleteSelection>().unwrap(), DeleteSelection::Placeholder);
        assert_eq!("".parse::<DeleteSelection>().unwrap(), DeleteSelection::Placeholder);
        assert_eq!("17".parse::<DeleteSelection>().unwrap(), DeleteSelection::Sequence(17));
        assert!("seventeen".parse::<DeleteSelection>().is_err());
    }

    #[tokio::test]
    async fn test_list_only_returns_dates_in_range() {
        let book = RecordBook::new(InMemoryRepository::<GlucoseReading>::new());
        for day in 1..=10 {
            book.add(glucose(day, 5.0 + day as f64 / 10.0)).await.unwrap();
        }

        let range = DateRange::new(date(3), date(6)).unwrap();
        let set = book.list(range).await.unwrap();

        assert_eq!(set.len(), 4);
        assert!(set.records.iter().all(|r| range.contains(r.date)));
    }

    #[tokio::test]
    async fn test_empty_range_is_not_an_error() {
        let book = RecordBook::new(InMemoryRepository::<GlucoseReading>::new());
        book.add(glucose(1, 6.0)).await.unwrap();

        let set = book.list(DateRange::single_day(date(20))).await.unwrap();
        assert!(set.is_empty());
        assert_eq!(set.delete_choices(), vec!["请选择".to_string()]);
    }

    #[tokio::test]
    async fn test_later_time_listed_first_on_same_day() {
        let book = RecordBook::new(InMemoryRepository::<BloodPressureReading>::new());
        book.add(blood_pressure(8)).await.unwrap();
        book.add(blood_pressure(20)).await.unwrap();

        let set = book.list(DateRange::single_day(date(1))).await.unwrap();
        let hours: Vec<String> = set.records.iter().map(|r| r.time.format("%H:%M").to_string()).collect();
        assert_eq!(hours, vec!["20:00", "08:00"]);
    }

    #[tokio::test]
    async fn test_remove_deletes_exactly_one() {
        let book = RecordBook::new(InMemoryRepository::<GlucoseReading>::new());
        let first = book.add(glucose(1, 6.0)).await.unwrap();
        let second = book.add(glucose(1, 7.0)).await.unwrap();
        let range = DateRange::single_day(date(1));

        let outcome = book.remove(DeleteSelection::Sequence(first)).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(first));

        let set = book.list(range).await.unwrap();
        assert_eq!(set.records.iter().map(|r| r.sequence).collect::<Vec<_>>(), vec![second]);
    }

    #[tokio::test]
    async fn test_placeholder_is_a_no_op() {
        let repository = InMemoryRepository::<GlucoseReading>::new();
        let book = RecordBook::new(repository.clone());
        book.add(glucose(1, 6.0)).await.unwrap();

        let outcome = book.remove(DeleteSelection::Placeholder).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Skipped);
        assert_eq!(repository.rows().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let book = RecordBook::new(InMemoryRepository::<GlucoseReading>::unavailable());
        let result = book.list(DateRange::single_day(date(1))).await;
        assert!(matches!(result, Err(ServiceError::Store(_))));
    }
}
