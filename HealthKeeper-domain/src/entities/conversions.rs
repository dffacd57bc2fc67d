use chrono::{NaiveTime, Timelike};

use health_keeper_data::models::{NewBloodPressureReading, NewGlucoseReading};

use super::{BloodPressureEntry, GlucoseEntry};

// Conversion functions between domain entries and data-layer insert rows.
// Times are cut to minute precision, which is what the store keeps.

fn to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Convert a validated glucose entry into its insert row
pub fn convert_to_data_glucose(entry: GlucoseEntry) -> NewGlucoseReading {
    NewGlucoseReading {
        date: entry.date,
        time: to_minute(entry.time),
        period: entry.period,
        value: entry.value,
        note: entry.note,
    }
}

/// Convert a validated blood pressure entry into its insert row
pub fn convert_to_data_blood_pressure(entry: BloodPressureEntry) -> NewBloodPressureReading {
    NewBloodPressureReading {
        date: entry.date,
        time: to_minute(entry.time),
        systolic: entry.systolic,
        diastolic: entry.diastolic,
        arm: entry.arm,
        heart_rate: entry.heart_rate,
        note: entry.note,
    }
}
