pub mod aggregation;
pub mod blood_pressure;
pub mod chart;
pub mod date_range;
pub mod errors;
pub mod export;
pub mod glucose;
pub mod insights;
pub mod records;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use blood_pressure::{create_blood_pressure_service, BloodPressureService, BloodPressureServiceTrait};
pub use errors::ServiceError;
pub use glucose::{create_glucose_service, GlucoseService, GlucoseServiceTrait};
pub use records::{DeleteOutcome, DeleteSelection, RecordSet};
