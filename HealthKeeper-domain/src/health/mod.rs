//! Health checks for the service and the remote table store it depends on

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use health_keeper_data::repository::RepositoryError;
use health_keeper_data::store::StoreClient;

/// Name the store component is reported under
pub const STORE_COMPONENT: &str = "table_store";

/// System health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components answer but not as expected
    Degraded,
    /// System cannot serve readings
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Something that can tell whether the table store answers
#[async_trait]
pub trait StoreCheck: Send + Sync {
    async fn check(&self) -> Result<(), RepositoryError>;
}

#[async_trait]
impl StoreCheck for StoreClient {
    async fn check(&self) -> Result<(), RepositoryError> {
        self.ping().await
    }
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the table store
    ///
    /// `Ok(true)` when it answers normally, `Ok(false)` when it answers with an
    /// unexpected status, `Err` when it cannot be reached at all.
    async fn check_store_status(&self) -> Result<bool, String>;
}

/// Health service backed by a store check
pub struct StoreHealthService<P> {
    store: Arc<P>,
}

impl<P: StoreCheck> StoreHealthService<P> {
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<P: StoreCheck + 'static> HealthServiceTrait for StoreHealthService<P> {
    async fn get_system_health(&self) -> SystemHealth {
        let store_component = match self.check_store_status().await {
            Ok(true) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
            Ok(false) => HealthComponent {
                status: ComponentStatus::Degraded,
                details: Some("Table store answered with an unexpected status".to_string()),
            },
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e),
            },
        };

        SystemHealth {
            status: overall_status(&[store_component.status]),
            components: vec![(STORE_COMPONENT.to_string(), store_component)]
                .into_iter()
                .collect(),
        }
    }

    async fn check_store_status(&self) -> Result<bool, String> {
        match self.store.check().await {
            Ok(()) => Ok(true),
            Err(e) if e.is_unreachable() => {
                warn!("Table store unreachable: {}", e);
                Err(format!("Table store unreachable: {}", e))
            }
            Err(e) => {
                warn!("Table store check returned: {}", e);
                Ok(false)
            }
        }
    }
}

/// Create a health service probing the shared store client
pub fn create_health_service(client: Arc<StoreClient>) -> impl HealthServiceTrait {
    StoreHealthService::new(client)
}

/// Worst component status wins
fn overall_status(components: &[ComponentStatus]) -> SystemStatus {
    if components.contains(&ComponentStatus::Unhealthy) {
        SystemStatus::Unhealthy
    } else if components.contains(&ComponentStatus::Degraded) {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    }
}
