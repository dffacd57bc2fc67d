// Public entities for the HealthKeeper API
// Request and response shapes crossing the HTTP boundary

// Range, status and shared request parsing
pub mod common;

// Glucose readings
pub mod glucose;

// Blood pressure readings
pub mod blood_pressure;
