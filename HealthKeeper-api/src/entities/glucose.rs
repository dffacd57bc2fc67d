use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use health_keeper_data::models::{clock_time, GlucoseReading, MeasurementPeriod};
use health_keeper_domain::entities::GlucoseEntry;
use health_keeper_domain::services::aggregation::GlucoseSummary;
use health_keeper_domain::services::chart::GlucoseChart;
use health_keeper_domain::services::ServiceError;

use super::common::{entry_moment, entry_note, DataStatus, RangeView, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Public representation of a glucose reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlucoseReadingView {
    pub sequence: i64,
    pub date: String,
    /// HH:MM
    pub time: String,
    /// Measurement period label
    pub period: String,
    /// mmol/L
    pub value: f64,
    pub note: String,
}

impl From<&GlucoseReading> for GlucoseReadingView {
    fn from(reading: &GlucoseReading) -> Self {
        Self {
            sequence: reading.sequence,
            date: reading.date.format(DATE_FORMAT).to_string(),
            time: reading.time.format(clock_time::FORMAT).to_string(),
            period: reading.period.label().to_string(),
            value: reading.value,
            note: reading.note.clone(),
        }
    }
}

/// Request payload for recording a glucose reading
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGlucoseRequest {
    /// YYYY-MM-DD; defaults to today in China Standard Time
    pub date: Option<String>,

    /// HH:MM; defaults to the current time in China Standard Time
    pub time: Option<String>,

    /// Period label (e.g. `早餐前（空腹）`) or code (e.g. `before_breakfast`)
    pub period: String,

    /// Glucose value in mmol/L (0-30)
    pub value: f64,

    /// Defaults to `状态良好`
    pub note: Option<String>,
}

impl CreateGlucoseRequest {
    /// Turn the request into a domain entry, filling defaults from `now`
    pub fn into_entry(self, now: NaiveDateTime) -> Result<GlucoseEntry, ServiceError> {
        let (date, time) = entry_moment(self.date.as_deref(), self.time.as_deref(), now)?;
        let period = MeasurementPeriod::parse(&self.period).ok_or_else(|| {
            ServiceError::Validation(format!("period: 未知的测量时段 {}", self.period))
        })?;

        Ok(GlucoseEntry {
            date,
            time,
            period,
            value: self.value,
            note: entry_note(self.note),
        })
    }
}

/// Readings in the selected range
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlucoseListResponse {
    pub status: DataStatus,
    pub range: RangeView,
    pub readings: Vec<GlucoseReadingView>,
    /// `请选择` followed by every listed sequence number
    pub delete_choices: Vec<String>,
}

/// Average for one measurement period
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PeriodAverageView {
    pub period: String,
    pub count: usize,
    pub average: f64,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlucoseSummaryView {
    pub count: usize,
    pub average: f64,
    /// Two decimals with unit, e.g. `7.20 mmol`
    pub display: String,
    /// Sorted by period label
    pub by_period: Vec<PeriodAverageView>,
}

impl From<GlucoseSummary> for GlucoseSummaryView {
    fn from(summary: GlucoseSummary) -> Self {
        Self {
            count: summary.count,
            average: summary.average,
            display: summary.display,
            by_period: summary
                .by_period
                .into_iter()
                .map(|group| PeriodAverageView {
                    period: group.period.to_string(),
                    count: group.count,
                    average: group.average,
                    display: group.display,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlucoseSummaryResponse {
    pub status: DataStatus,
    pub range: RangeView,
    /// Absent when there are no readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<GlucoseSummaryView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlucosePointView {
    pub timestamp: String,
    pub value: f64,
    pub period: String,
}

/// Glucose trend chart, oldest point first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GlucoseChartResponse {
    pub status: DataStatus,
    pub range: RangeView,
    pub title: String,
    /// strftime pattern for the x-axis ticks
    pub tick_format: String,
    pub points: Vec<GlucosePointView>,
}

impl GlucoseChartResponse {
    pub fn new(range: RangeView, chart: GlucoseChart) -> Self {
        Self {
            status: DataStatus::of(chart.points.is_empty()),
            range,
            title: chart.title.to_string(),
            tick_format: chart.tick_format.to_string(),
            points: chart
                .points
                .into_iter()
                .map(|point| GlucosePointView {
                    timestamp: point.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    value: point.value,
                    period: point.period.to_string(),
                })
                .collect(),
        }
    }
}
