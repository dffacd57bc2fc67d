//! Averages over filtered record sets
//!
//! Means are computed at full precision; rounding to two decimals happens only
//! in the display strings.

use std::collections::BTreeMap;

use serde::Serialize;

use health_keeper_data::models::{BloodPressureReading, GlucoseReading};

use super::insights::{categorize_blood_pressure, BloodPressureCategory};

/// Arithmetic mean of one numeric field; `None` for an empty input
pub fn overall_average<T, F>(records: &[T], value: F) -> Option<f64>
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(value).sum();
    Some(sum / records.len() as f64)
}

/// Mean of one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage<K> {
    pub group: K,
    pub count: usize,
    pub average: f64,
}

/// Mean of `value` per distinct `key`, groups in ascending key order
///
/// An empty input yields no groups.
pub fn grouped_average<T, K, FK, FV>(records: &[T], key: FK, value: FV) -> Vec<GroupAverage<K>>
where
    K: Ord,
    FK: Fn(&T) -> K,
    FV: Fn(&T) -> f64,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0.0, 0));
        entry.0 += value(record);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(group, (sum, count))| GroupAverage {
            group,
            count,
            average: sum / count as f64,
        })
        .collect()
}

/// Two-decimal display form, e.g. `7.20 mmol`
pub fn format_average(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

/// Average glucose for one measurement period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodAverage {
    /// Period label
    pub period: &'static str,
    pub count: usize,
    pub average: f64,
    pub display: String,
}

/// Averages over a glucose record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlucoseSummary {
    pub count: usize,
    pub average: f64,
    pub display: String,
    /// Per-period means ordered by period label
    pub by_period: Vec<PeriodAverage>,
}

/// Summarize glucose readings; `None` when there are none
pub fn summarize_glucose(readings: &[GlucoseReading]) -> Option<GlucoseSummary> {
    let average = overall_average(readings, |r| r.value)?;

    let by_period = grouped_average(readings, |r| r.period.label(), |r| r.value)
        .into_iter()
        .map(|group| PeriodAverage {
            period: group.group,
            count: group.count,
            average: group.average,
            display: format_average(group.average, "mmol"),
        })
        .collect();

    Some(GlucoseSummary {
        count: readings.len(),
        average,
        display: format_average(average, "mmol"),
        by_period,
    })
}

/// Averages over a blood pressure record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressureSummary {
    pub count: usize,
    pub avg_systolic: f64,
    pub systolic_display: String,
    pub avg_diastolic: f64,
    pub diastolic_display: String,
    pub avg_heart_rate: f64,
    /// Category of the averaged reading
    pub category: BloodPressureCategory,
}

/// Summarize blood pressure readings; `None` when there are none
pub fn summarize_blood_pressure(readings: &[BloodPressureReading]) -> Option<BloodPressureSummary> {
    let avg_systolic = overall_average(readings, |r| r.systolic as f64)?;
    let avg_diastolic = overall_average(readings, |r| r.diastolic as f64)?;
    let avg_heart_rate = overall_average(readings, |r| r.heart_rate as f64)?;

    Some(BloodPressureSummary {
        count: readings.len(),
        avg_systolic,
        systolic_display: format_average(avg_systolic, "mmHg"),
        avg_diastolic,
        diastolic_display: format_average(avg_diastolic, "mmHg"),
        avg_heart_rate,
        category: categorize_blood_pressure(avg_systolic, avg_diastolic),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use health_keeper_data::models::{Arm, MeasurementPeriod};

    fn glucose(period: MeasurementPeriod, value: f64) -> GlucoseReading {
        GlucoseReading {
            sequence: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            period,
            value,
            note: String::new(),
        }
    }

    fn blood_pressure(systolic: i32, diastolic: i32, heart_rate: i32) -> BloodPressureReading {
        BloodPressureReading {
            sequence: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            systolic,
            diastolic,
            arm: Arm::Left,
            heart_rate,
            note: String::new(),
        }
    }

    #[test]
    fn test_overall_average_of_empty_input_is_none() {
        let empty: Vec<GlucoseReading> = Vec::new();
        assert_eq!(overall_average(&empty, |r| r.value), None);
        assert!(grouped_average(&empty, |r| r.period.label(), |r| r.value).is_empty());
        assert!(summarize_glucose(&empty).is_none());
        assert!(summarize_blood_pressure(&[]).is_none());
    }

    #[test]
    fn test_single_reading_average() {
        let summary = summarize_glucose(&[glucose(MeasurementPeriod::BeforeBreakfast, 7.2)]).unwrap();
        assert_eq!(summary.average, 7.2);
        assert_eq!(summary.display, "7.20 mmol");
    }

    #[test]
    fn test_full_precision_is_kept() {
        let readings = vec![
            glucose(MeasurementPeriod::BeforeLunch, 5.0),
            glucose(MeasurementPeriod::BeforeLunch, 5.0),
            glucose(MeasurementPeriod::BeforeLunch, 6.0),
        ];
        let summary = summarize_glucose(&readings).unwrap();
        assert!((summary.average - 16.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.display, "5.33 mmol");
    }

    #[test]
    fn test_groups_are_in_label_order() {
        let readings = vec![
            glucose(MeasurementPeriod::AfterDinner, 9.0),
            glucose(MeasurementPeriod::BeforeBreakfast, 6.0),
            glucose(MeasurementPeriod::AfterDinner, 11.0),
            glucose(MeasurementPeriod::BeforeLunch, 7.0),
        ];
        let summary = summarize_glucose(&readings).unwrap();

        let labels: Vec<&str> = summary.by_period.iter().map(|p| p.period).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);
        assert_eq!(labels.len(), 3);

        let dinner = summary
            .by_period
            .iter()
            .find(|p| p.period == MeasurementPeriod::AfterDinner.label())
            .unwrap();
        assert_eq!(dinner.count, 2);
        assert_eq!(dinner.average, 10.0);
        assert_eq!(dinner.display, "10.00 mmol");
    }

    #[test]
    fn test_blood_pressure_summary() {
        let readings = vec![blood_pressure(160, 95, 80), blood_pressure(141, 90, 71)];
        let summary = summarize_blood_pressure(&readings).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_systolic, 150.5);
        assert_eq!(summary.systolic_display, "150.50 mmHg");
        assert_eq!(summary.diastolic_display, "92.50 mmHg");
        assert_eq!(summary.avg_heart_rate, 75.5);
        assert_eq!(summary.category, BloodPressureCategory::Hypertension2);
    }
}
