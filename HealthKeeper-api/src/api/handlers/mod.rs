pub mod blood_pressure;
pub mod errors;
pub mod export;
pub mod glucose;
pub mod health;
pub mod range;

// Re-export handlers for easier imports
pub use errors::ErrorResponse;
pub use health::health_check;
pub use range::get_range;
