// HealthKeeper Data
// This crate talks to the hosted table store that holds every reading

// Store configuration and the shared HTTP handle
pub mod store;

// Row models as they are stored
pub mod models;

// Repository implementations for data access
pub mod repository;
