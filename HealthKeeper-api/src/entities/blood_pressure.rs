use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_keeper_data::models::{clock_time, Arm, BloodPressureReading};
use health_keeper_domain::entities::BloodPressureEntry;
use health_keeper_domain::services::aggregation::BloodPressureSummary;
use health_keeper_domain::services::chart::BloodPressureChart;
use health_keeper_domain::services::ServiceError;

use super::common::{entry_moment, entry_note, DataStatus, RangeView, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Public representation of a blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureReadingView {
    pub sequence: i64,
    pub date: String,
    /// HH:MM
    pub time: String,
    /// Systolic blood pressure (the higher number)
    pub systolic: i32,
    /// Diastolic blood pressure (the lower number)
    pub diastolic: i32,
    /// Arm label
    pub arm: String,
    pub heart_rate: i32,
    pub note: String,
}

impl From<&BloodPressureReading> for BloodPressureReadingView {
    fn from(reading: &BloodPressureReading) -> Self {
        Self {
            sequence: reading.sequence,
            date: reading.date.format(DATE_FORMAT).to_string(),
            time: reading.time.format(clock_time::FORMAT).to_string(),
            systolic: reading.systolic,
            diastolic: reading.diastolic,
            arm: reading.arm.label().to_string(),
            heart_rate: reading.heart_rate,
            note: reading.note.clone(),
        }
    }
}

/// Request payload for recording a blood pressure reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBloodPressureRequest {
    /// YYYY-MM-DD; defaults to today in China Standard Time
    pub date: Option<String>,

    /// HH:MM; defaults to the current time in China Standard Time
    pub time: Option<String>,

    /// Systolic blood pressure (40-300)
    pub systolic: i32,

    /// Diastolic blood pressure (20-200)
    pub diastolic: i32,

    /// `左臂` / `右臂` or `left` / `right`
    pub arm: String,

    /// Heart rate in beats per minute (20-250)
    pub heart_rate: i32,

    /// Defaults to `状态良好`
    pub note: Option<String>,
}

impl CreateBloodPressureRequest {
    /// Turn the request into a domain entry, filling defaults from `now`
    pub fn into_entry(self, now: NaiveDateTime) -> Result<BloodPressureEntry, ServiceError> {
        let (date, time) = entry_moment(self.date.as_deref(), self.time.as_deref(), now)?;
        let arm = Arm::parse(&self.arm)
            .ok_or_else(|| ServiceError::Validation(format!("arm: 未知的测量手臂 {}", self.arm)))?;

        Ok(BloodPressureEntry {
            date,
            time,
            systolic: self.systolic,
            diastolic: self.diastolic,
            arm,
            heart_rate: self.heart_rate,
            note: entry_note(self.note),
        })
    }
}

/// Readings in the selected range
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureListResponse {
    pub status: DataStatus,
    pub range: RangeView,
    pub readings: Vec<BloodPressureReadingView>,
    /// `请选择` followed by every listed sequence number
    pub delete_choices: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureSummaryView {
    pub count: usize,
    pub avg_systolic: f64,
    /// Two decimals with unit, e.g. `135.50 mmHg`
    pub systolic_display: String,
    pub avg_diastolic: f64,
    pub diastolic_display: String,
    pub avg_heart_rate: f64,
    /// Category of the mean reading, e.g. `hypertension2`
    pub category: String,
    pub category_label: String,
}

impl From<BloodPressureSummary> for BloodPressureSummaryView {
    fn from(summary: BloodPressureSummary) -> Self {
        let category = serde_json::to_value(summary.category)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();

        Self {
            count: summary.count,
            avg_systolic: summary.avg_systolic,
            systolic_display: summary.systolic_display,
            avg_diastolic: summary.avg_diastolic,
            diastolic_display: summary.diastolic_display,
            avg_heart_rate: summary.avg_heart_rate,
            category,
            category_label: summary.category.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureSummaryResponse {
    pub status: DataStatus,
    pub range: RangeView,
    /// Absent when there are no readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<BloodPressureSummaryView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeriesPointView {
    pub timestamp: String,
    /// Systolic or diastolic column name
    pub series: String,
    pub value: f64,
}

/// Blood pressure trend chart, oldest point first, two series
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BloodPressureChartResponse {
    pub status: DataStatus,
    pub range: RangeView,
    pub title: String,
    pub tick_format: String,
    pub series: Vec<String>,
    pub points: Vec<SeriesPointView>,
}

impl BloodPressureChartResponse {
    pub fn new(range: RangeView, chart: BloodPressureChart) -> Self {
        Self {
            status: DataStatus::of(chart.points.is_empty()),
            range,
            title: chart.title.to_string(),
            tick_format: chart.tick_format.to_string(),
            series: chart.series.iter().map(|s| s.to_string()).collect(),
            points: chart
                .points
                .into_iter()
                .map(|point| SeriesPointView {
                    timestamp: point.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    series: point.series.to_string(),
                    value: point.value,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_request_accepts_arm_alias_and_defaults() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(20, 5, 0)
            .unwrap();
        let request = CreateBloodPressureRequest {
            date: Some("2024-05-31".to_string()),
            time: None,
            systolic: 135,
            diastolic: 85,
            arm: "right".to_string(),
            heart_rate: 70,
            note: Some("饭后".to_string()),
        };

        let entry = request.into_entry(now).unwrap();
        assert_eq!(entry.arm, Arm::Right);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(entry.time, now.time());
        assert_eq!(entry.note, "饭后");
    }
}
