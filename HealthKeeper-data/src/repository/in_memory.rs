use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{compare_for_listing, RecordRepository, RepositoryError, TableRecord};
use crate::models::{DateRange, SequenceNumber};

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_sequence: SequenceNumber,
}

/// In-memory stand-in for one store table
///
/// Assigns sequence numbers from 1 upwards and answers range queries in the
/// same order the hosted store does. Rows that tie on every order key keep
/// insertion order.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    table: Arc<Mutex<Table<T>>>,
    unavailable: bool,
}

impl<T: TableRecord> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRecord> InMemoryRepository<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                rows: Vec::new(),
                next_sequence: 1,
            })),
            unavailable: false,
        }
    }

    /// Create a table that fails every operation like an unreachable store
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Rows currently held, in insertion order
    pub fn rows(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.table.lock()?.rows.clone())
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Status {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<T: TableRecord> RecordRepository<T> for InMemoryRepository<T> {
    async fn insert(&self, record: T::New) -> Result<SequenceNumber, RepositoryError> {
        self.check_available()?;
        let mut table = self.table.lock()?;
        let sequence = table.next_sequence;
        table.next_sequence += 1;
        table.rows.push(T::from_new(record, sequence));
        Ok(sequence)
    }

    async fn query(&self, range: DateRange) -> Result<Vec<T>, RepositoryError> {
        self.check_available()?;
        let table = self.table.lock()?;
        let mut rows: Vec<T> = table
            .rows
            .iter()
            .filter(|row| range.contains(row.date()))
            .cloned()
            .collect();
        rows.sort_by(compare_for_listing);
        Ok(rows)
    }

    async fn delete(&self, sequence: SequenceNumber) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut table = self.table.lock()?;
        table.rows.retain(|row| row.sequence() != sequence);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GlucoseReading, MeasurementPeriod, NewGlucoseReading};
    use chrono::{NaiveDate, NaiveTime};

    fn entry(day: u32, value: f64) -> NewGlucoseReading {
        NewGlucoseReading {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            period: MeasurementPeriod::BeforeBreakfast,
            value,
            note: String::new(),
        }
    }

    fn june(start: u32, end: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, start).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, end).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_monotonic() {
        let repo = InMemoryRepository::<GlucoseReading>::new();
        let first = repo.insert(entry(1, 6.0)).await.unwrap();
        let second = repo.insert(entry(1, 7.0)).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn test_query_is_inclusive_and_newest_first() {
        let repo = InMemoryRepository::<GlucoseReading>::new();
        for day in [1, 5, 10, 15] {
            repo.insert(entry(day, day as f64)).await.unwrap();
        }

        let rows = repo.query(june(5, 10)).await.unwrap();
        let days: Vec<u32> = rows.iter().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![10, 5]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_row() {
        let repo = InMemoryRepository::<GlucoseReading>::new();
        let keep = repo.insert(entry(1, 6.0)).await.unwrap();
        let drop = repo.insert(entry(1, 7.0)).await.unwrap();

        repo.delete(drop).await.unwrap();

        let rows = repo.query(june(1, 1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sequence, keep);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let repo = InMemoryRepository::<GlucoseReading>::unavailable();
        assert!(repo.insert(entry(1, 6.0)).await.is_err());
        assert!(repo.query(june(1, 1)).await.is_err());
    }
}
