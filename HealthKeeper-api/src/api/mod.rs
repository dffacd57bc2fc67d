pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::{extract::FromRef, Router};

use health_keeper_data::store::{ConfigError, StoreClient, StoreConfig};
use health_keeper_domain::health::create_health_service;
use health_keeper_domain::services::{create_blood_pressure_service, create_glucose_service};

use handlers::blood_pressure::BloodPressureService;
use handlers::glucose::GlucoseService;
use handlers::health::HealthService;

/// Router state; handlers pull their own service out through `FromRef`
#[derive(Clone, FromRef)]
pub struct AppState {
    pub glucose: GlucoseService,
    pub blood_pressure: BloodPressureService,
}

/// Services the application is assembled from
#[derive(Clone)]
pub struct AppServices {
    pub glucose: GlucoseService,
    pub blood_pressure: BloodPressureService,
    pub health: HealthService,
}

impl AppServices {
    /// Build every service over one store client shared for the process lifetime
    pub fn connect(config: &StoreConfig) -> Result<Self, ConfigError> {
        let client = Arc::new(StoreClient::connect(config)?);

        Ok(Self {
            glucose: Arc::new(create_glucose_service(client.clone(), config)),
            blood_pressure: Arc::new(create_blood_pressure_service(client.clone(), config)),
            health: Arc::new(create_health_service(client)),
        })
    }
}

/// Create the application router
pub fn create_application(services: AppServices) -> Router {
    routes::create_app(services)
}
