use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};
use validator::Validate;

use health_keeper_data::models::{DateRange, GlucoseReading, SequenceNumber};
use health_keeper_data::repository::{RecordRepository, RemoteRepository};
use health_keeper_data::store::{StoreClient, StoreConfig};

use super::aggregation::{summarize_glucose, GlucoseSummary};
use super::chart::{glucose_chart, GlucoseChart};
use super::errors::ServiceError;
use super::export::{export_records, ExportArtifact};
use super::records::{DeleteOutcome, DeleteSelection, RecordBook, RecordSet};
use crate::entities::conversions;
use crate::entities::GlucoseEntry;

/// Trait for glucose service operations
#[async_trait]
pub trait GlucoseServiceTrait: Send + Sync {
    /// Validate an entry without storing it
    fn validate_entry(&self, entry: &GlucoseEntry) -> Result<(), ServiceError>;

    /// Validate and store a new reading
    async fn record_reading(&self, entry: GlucoseEntry) -> Result<SequenceNumber, ServiceError>;

    /// Readings dated inside `range`, newest day first
    async fn list_readings(&self, range: DateRange) -> Result<RecordSet<GlucoseReading>, ServiceError>;

    /// Delete the picked reading
    async fn delete_reading(&self, selection: DeleteSelection) -> Result<DeleteOutcome, ServiceError>;

    /// Overall and per-period averages
    fn summarize(&self, readings: &[GlucoseReading]) -> Option<GlucoseSummary>;

    /// Chronological chart series
    fn chart(&self, readings: &[GlucoseReading]) -> GlucoseChart;

    /// Spreadsheet of exactly these readings
    fn export(&self, readings: &[GlucoseReading]) -> Result<ExportArtifact, ServiceError>;
}

/// Glucose service for domain logic
pub struct GlucoseService<R> {
    book: RecordBook<GlucoseReading, R>,
}

impl<R: RecordRepository<GlucoseReading>> GlucoseService<R> {
    /// Create a new glucose service
    pub fn new(repository: R) -> Self {
        Self {
            book: RecordBook::new(repository),
        }
    }
}

#[async_trait]
impl<R: RecordRepository<GlucoseReading>> GlucoseServiceTrait for GlucoseService<R> {
    fn validate_entry(&self, entry: &GlucoseEntry) -> Result<(), ServiceError> {
        entry.validate().map_err(|errors| {
            let error = ServiceError::from(errors);
            warn!("Rejected glucose entry: {}", error);
            error
        })
    }

    #[instrument(skip(self, entry))]
    async fn record_reading(&self, entry: GlucoseEntry) -> Result<SequenceNumber, ServiceError> {
        self.validate_entry(&entry)?;
        self.book.add(conversions::convert_to_data_glucose(entry)).await
    }

    #[instrument(skip(self))]
    async fn list_readings(&self, range: DateRange) -> Result<RecordSet<GlucoseReading>, ServiceError> {
        self.book.list(range).await
    }

    #[instrument(skip(self))]
    async fn delete_reading(&self, selection: DeleteSelection) -> Result<DeleteOutcome, ServiceError> {
        self.book.remove(selection).await
    }

    fn summarize(&self, readings: &[GlucoseReading]) -> Option<GlucoseSummary> {
        summarize_glucose(readings)
    }

    fn chart(&self, readings: &[GlucoseReading]) -> GlucoseChart {
        glucose_chart(readings)
    }

    fn export(&self, readings: &[GlucoseReading]) -> Result<ExportArtifact, ServiceError> {
        Ok(export_records(readings)?)
    }
}

/// Create a glucose service over the configured table of the shared store
pub fn create_glucose_service(
    client: Arc<StoreClient>,
    config: &StoreConfig,
) -> impl GlucoseServiceTrait {
    GlucoseService::new(RemoteRepository::glucose(client, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use health_keeper_data::models::MeasurementPeriod;
    use health_keeper_data::repository::InMemoryRepository;

    fn entry(value: f64) -> GlucoseEntry {
        GlucoseEntry {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            period: MeasurementPeriod::BeforeBreakfast,
            value,
            note: "状态良好".to_string(),
        }
    }

    fn service() -> GlucoseService<InMemoryRepository<GlucoseReading>> {
        GlucoseService::new(InMemoryRepository::new())
    }

    #[tokio::test]
    async fn test_recorded_reading_is_listed_and_averaged() {
        let service = service();
        service.record_reading(entry(7.2)).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let set = service.list_readings(DateRange::single_day(day)).await.unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].value, 7.2);
        assert_eq!(set.records[0].note, "状态良好");

        let summary = service.summarize(&set.records).unwrap();
        assert_eq!(summary.display, "7.20 mmol");
    }

    #[test]
    fn test_value_outside_domain_is_rejected() {
        let service = service();
        for value in [-0.1, 30.1] {
            let result = service.validate_entry(&entry(value));
            assert!(matches!(result, Err(ServiceError::Validation(_))), "value {}", value);
        }
        assert!(service.validate_entry(&entry(0.0)).is_ok());
        assert!(service.validate_entry(&entry(30.0)).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_entry_never_reaches_store() {
        let repository = InMemoryRepository::<GlucoseReading>::new();
        let service = GlucoseService::new(repository.clone());

        let result = service.record_reading(entry(42.0)).await;
        assert!(result.is_err());
        assert!(repository.rows().unwrap().is_empty());
    }

    #[test]
    fn test_long_note_is_rejected() {
        let mut long = entry(6.0);
        long.note = "很".repeat(501);
        let error = service().validate_entry(&long).unwrap_err();
        assert!(error.to_string().contains("note"));
    }
}
