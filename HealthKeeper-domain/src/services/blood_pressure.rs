use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};
use validator::Validate;

use health_keeper_data::models::{BloodPressureReading, DateRange, SequenceNumber};
use health_keeper_data::repository::{RecordRepository, RemoteRepository};
use health_keeper_data::store::{StoreClient, StoreConfig};

use super::aggregation::{summarize_blood_pressure, BloodPressureSummary};
use super::chart::{blood_pressure_chart, BloodPressureChart};
use super::errors::ServiceError;
use super::export::{export_records, ExportArtifact};
use super::records::{DeleteOutcome, DeleteSelection, RecordBook, RecordSet};
use crate::entities::conversions;
use crate::entities::BloodPressureEntry;

/// Trait for blood pressure service operations
#[async_trait]
pub trait BloodPressureServiceTrait: Send + Sync {
    /// Validate an entry without storing it
    fn validate_entry(&self, entry: &BloodPressureEntry) -> Result<(), ServiceError>;

    /// Validate and store a new reading
    async fn record_reading(&self, entry: BloodPressureEntry) -> Result<SequenceNumber, ServiceError>;

    /// Readings dated inside `range`, newest first by date then time
    async fn list_readings(
        &self,
        range: DateRange,
    ) -> Result<RecordSet<BloodPressureReading>, ServiceError>;

    /// Delete the picked reading
    async fn delete_reading(&self, selection: DeleteSelection) -> Result<DeleteOutcome, ServiceError>;

    /// Systolic, diastolic and heart-rate averages
    fn summarize(&self, readings: &[BloodPressureReading]) -> Option<BloodPressureSummary>;

    /// Chronological systolic/diastolic series
    fn chart(&self, readings: &[BloodPressureReading]) -> BloodPressureChart;

    /// Spreadsheet of exactly these readings
    fn export(&self, readings: &[BloodPressureReading]) -> Result<ExportArtifact, ServiceError>;
}

/// Blood pressure service for domain logic
pub struct BloodPressureService<R> {
    book: RecordBook<BloodPressureReading, R>,
}

impl<R: RecordRepository<BloodPressureReading>> BloodPressureService<R> {
    /// Create a new blood pressure service
    pub fn new(repository: R) -> Self {
        Self {
            book: RecordBook::new(repository),
        }
    }
}

#[async_trait]
impl<R: RecordRepository<BloodPressureReading>> BloodPressureServiceTrait for BloodPressureService<R> {
    fn validate_entry(&self, entry: &BloodPressureEntry) -> Result<(), ServiceError> {
        entry.validate().map_err(|errors| {
            let error = ServiceError::from(errors);
            warn!("Rejected blood pressure entry: {}", error);
            error
        })?;

        if entry.systolic <= entry.diastolic {
            warn!(
                "Rejected blood pressure entry: systolic {} not above diastolic {}",
                entry.systolic, entry.diastolic
            );
            return Err(ServiceError::Validation(
                "高压（收缩压）必须高于低压（舒张压）".to_string(),
            ));
        }

        Ok(())
    }

    #[instrument(skip(self, entry))]
    async fn record_reading(&self, entry: BloodPressureEntry) -> Result<SequenceNumber, ServiceError> {
        self.validate_entry(&entry)?;
        self.book
            .add(conversions::convert_to_data_blood_pressure(entry))
            .await
    }

    #[instrument(skip(self))]
    async fn list_readings(
        &self,
        range: DateRange,
    ) -> Result<RecordSet<BloodPressureReading>, ServiceError> {
        self.book.list(range).await
    }

    #[instrument(skip(self))]
    async fn delete_reading(&self, selection: DeleteSelection) -> Result<DeleteOutcome, ServiceError> {
        self.book.remove(selection).await
    }

    fn summarize(&self, readings: &[BloodPressureReading]) -> Option<BloodPressureSummary> {
        summarize_blood_pressure(readings)
    }

    fn chart(&self, readings: &[BloodPressureReading]) -> BloodPressureChart {
        blood_pressure_chart(readings)
    }

    fn export(&self, readings: &[BloodPressureReading]) -> Result<ExportArtifact, ServiceError> {
        Ok(export_records(readings)?)
    }
}

/// Create a blood pressure service over the configured table of the shared store
pub fn create_blood_pressure_service(
    client: Arc<StoreClient>,
    config: &StoreConfig,
) -> impl BloodPressureServiceTrait {
    BloodPressureService::new(RemoteRepository::blood_pressure(client, config))
}
