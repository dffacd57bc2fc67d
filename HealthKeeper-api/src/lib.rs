// HealthKeeper-api lib.rs
//
// JSON/HTTP boundary over the glucose and blood pressure services.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;
