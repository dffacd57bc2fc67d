use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{RecordRepository, RepositoryError, SortKey, TableRecord};
use crate::models::{
    BloodPressureReading, DateRange, GlucoseReading, SequenceNumber, DATE_COLUMN, SEQUENCE_COLUMN,
};
use crate::store::{StoreClient, StoreConfig};

/// Repository backed by one table of the hosted store
#[derive(Debug)]
pub struct RemoteRepository<T> {
    client: Arc<StoreClient>,
    table: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RemoteRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            table: self.table.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: TableRecord> RemoteRepository<T> {
    /// Create a repository over `table` using the shared store handle
    pub fn new(client: Arc<StoreClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            _record: PhantomData,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl RemoteRepository<GlucoseReading> {
    /// Repository over the configured glucose table
    pub fn glucose(client: Arc<StoreClient>, config: &StoreConfig) -> Self {
        Self::new(client, config.glucose_table.clone())
    }
}

impl RemoteRepository<BloodPressureReading> {
    /// Repository over the configured blood pressure table
    pub fn blood_pressure(client: Arc<StoreClient>, config: &StoreConfig) -> Self {
        Self::new(client, config.blood_pressure_table.clone())
    }
}

/// Filter pairs selecting every column of rows dated inside `range`
pub fn range_filters(range: &DateRange, order: &[SortKey]) -> Vec<(String, String)> {
    let mut filters = vec![
        ("select".to_string(), "*".to_string()),
        (DATE_COLUMN.to_string(), format!("gte.{}", range.start())),
        (DATE_COLUMN.to_string(), format!("lte.{}", range.end())),
    ];

    if !order.is_empty() {
        let clause = order
            .iter()
            .map(|key| {
                let direction = if key.descending { "desc" } else { "asc" };
                format!("{}.{}", key.column_name(), direction)
            })
            .collect::<Vec<_>>()
            .join(",");
        filters.push(("order".to_string(), clause));
    }

    filters
}

/// Filter pair matching exactly one sequence number
pub fn sequence_filter(sequence: SequenceNumber) -> Vec<(String, String)> {
    vec![(SEQUENCE_COLUMN.to_string(), format!("eq.{}", sequence))]
}

#[async_trait]
impl<T: TableRecord> RecordRepository<T> for RemoteRepository<T> {
    async fn insert(&self, record: T::New) -> Result<SequenceNumber, RepositoryError> {
        debug!("Inserting {} record into table {}", T::KIND, self.table);

        let request = self.client.insert_request(&self.table, &record);
        let rows: Vec<T> = self.client.fetch(request).await?;
        let sequence = rows
            .first()
            .map(TableRecord::sequence)
            .ok_or(RepositoryError::EmptyInsert(T::KIND))?;

        info!("Stored {} record with sequence number {}", T::KIND, sequence);
        Ok(sequence)
    }

    async fn query(&self, range: DateRange) -> Result<Vec<T>, RepositoryError> {
        debug!(
            "Querying {} records from {} to {}",
            T::KIND,
            range.start(),
            range.end()
        );

        let filters = range_filters(&range, T::ORDER);
        let request = self.client.select_request(&self.table, &filters);
        let rows: Vec<T> = self.client.fetch(request).await?;

        debug!("Store returned {} {} records", rows.len(), T::KIND);
        Ok(rows)
    }

    async fn delete(&self, sequence: SequenceNumber) -> Result<(), RepositoryError> {
        debug!("Deleting {} record {}", T::KIND, sequence);

        let request = self
            .client
            .delete_request(&self.table, &sequence_filter(sequence));
        self.client.execute(request).await?;

        info!("Deleted {} record {}", T::KIND, sequence);
        Ok(())
    }
}
