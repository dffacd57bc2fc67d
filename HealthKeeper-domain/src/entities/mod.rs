// Domain entities and value objects
pub mod blood_pressure;
pub mod conversions;
pub mod glucose;

// Stored models are shared with the data layer unchanged
pub use health_keeper_data::models::{
    Arm, BloodPressureReading, DateRange, GlucoseReading, MeasurementPeriod, SequenceNumber, Timed,
};

pub use blood_pressure::BloodPressureEntry;
pub use glucose::GlucoseEntry;

/// Note pre-filled on the entry form
pub const DEFAULT_NOTE: &str = "状态良好";
