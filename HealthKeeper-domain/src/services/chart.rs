//! Chronological series for the trend charts
//!
//! Listings arrive newest first; charts need oldest first. Sorting is stable,
//! so readings sharing a timestamp keep their incoming order.

use chrono::NaiveDateTime;
use serde::Serialize;

use health_keeper_data::models::{
    blood_pressure::{DIASTOLIC_COLUMN, SYSTOLIC_COLUMN},
    BloodPressureReading, GlucoseReading, Timed,
};

/// A record paired with its merged date-time
#[derive(Debug, Clone)]
pub struct Stamped<'a, T> {
    pub timestamp: NaiveDateTime,
    pub record: &'a T,
}

/// Stamp every record and order ascending by timestamp
pub fn chronological<T: Timed>(records: &[T]) -> Vec<Stamped<'_, T>> {
    let mut stamped: Vec<Stamped<'_, T>> = records
        .iter()
        .map(|record| Stamped {
            timestamp: record.timestamp(),
            record,
        })
        .collect();
    stamped.sort_by_key(|s| s.timestamp);
    stamped
}

/// One glucose point, colored by period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlucosePoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub period: &'static str,
}

/// Glucose trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlucoseChart {
    pub title: &'static str,
    /// strftime pattern for x-axis ticks
    pub tick_format: &'static str,
    pub points: Vec<GlucosePoint>,
}

/// One point of a labelled series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    pub series: &'static str,
    pub value: f64,
}

/// Blood pressure trend chart: systolic and diastolic on one time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressureChart {
    pub title: &'static str,
    pub tick_format: &'static str,
    pub series: [&'static str; 2],
    pub points: Vec<SeriesPoint>,
}

pub fn glucose_chart(readings: &[GlucoseReading]) -> GlucoseChart {
    let points = chronological(readings)
        .into_iter()
        .map(|s| GlucosePoint {
            timestamp: s.timestamp,
            value: s.record.value,
            period: s.record.period.label(),
        })
        .collect();

    GlucoseChart {
        title: "血糖长期趋势图",
        tick_format: "%y-%m-%d %H:%M",
        points,
    }
}

pub fn blood_pressure_chart(readings: &[BloodPressureReading]) -> BloodPressureChart {
    let points = chronological(readings)
        .into_iter()
        .flat_map(|s| {
            [
                SeriesPoint {
                    timestamp: s.timestamp,
                    series: SYSTOLIC_COLUMN,
                    value: s.record.systolic as f64,
                },
                SeriesPoint {
                    timestamp: s.timestamp,
                    series: DIASTOLIC_COLUMN,
                    value: s.record.diastolic as f64,
                },
            ]
        })
        .collect();

    BloodPressureChart {
        title: "血压长期趋势图",
        tick_format: "%Y-%m-%d %H:%M",
        series: [SYSTOLIC_COLUMN, DIASTOLIC_COLUMN],
        points,
    }
}
