// HealthKeeper Domain
// This crate turns stored readings into filtered views, averages, charts and exports

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the store module from health_keeper_data for convenience
pub use health_keeper_data::store;
