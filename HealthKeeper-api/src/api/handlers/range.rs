use axum::{extract::Query, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use tracing::{info, instrument};

use health_keeper_data::models::DateRange;
use health_keeper_domain::services::date_range::{
    resolve, resolve_now, RangePreset, RangeSelection,
};
use health_keeper_domain::services::ServiceError;

use super::errors::ErrorResponse;
use crate::entities::common::{parse_date, RangeQuery, RangeView};

/// Value of `range` selecting explicit bounds
pub const CUSTOM_RANGE: &str = "custom";

/// Interpret the query parameters as a range selection
pub fn selection_from_query(query: &RangeQuery) -> Result<RangeSelection, ServiceError> {
    let preset = match query.range.as_deref().map(str::trim) {
        None | Some("") | Some("30") => RangePreset::Last30Days,
        Some("7") => RangePreset::Last7Days,
        Some("60") => RangePreset::Last60Days,
        Some(CUSTOM_RANGE) => {
            return Ok(RangeSelection::Custom {
                start: optional_date("start_date", query.start_date.as_deref())?,
                end: optional_date("end_date", query.end_date.as_deref())?,
            })
        }
        Some(other) => {
            return Err(ServiceError::Validation(format!(
                "range: 不支持的时间范围 {}",
                other
            )))
        }
    };
    Ok(RangeSelection::Preset(preset))
}

fn optional_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ServiceError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

/// Resolve the query against a given "today"
pub fn resolve_query_at(query: &RangeQuery, today: NaiveDate) -> Result<DateRange, ErrorResponse> {
    let selection = selection_from_query(query)?;
    Ok(resolve(selection, today)?)
}

/// Resolve the query against today in China
pub fn resolve_query(query: &RangeQuery) -> Result<DateRange, ErrorResponse> {
    let selection = selection_from_query(query)?;
    Ok(resolve_now(selection)?)
}

/// Resolve a range selection
#[utoipa::path(
    get,
    path = "/api/v1/range",
    params(RangeQuery),
    responses(
        (status = 200, description = "Range resolved", body = RangeView),
        (status = 400, description = "Invalid or inverted range", body = ErrorResponse),
    ),
    tag = "range"
)]
#[instrument]
pub async fn get_range(Query(query): Query<RangeQuery>) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    info!("Resolved range {} .. {}", range.start(), range.end());
    Ok((StatusCode::OK, Json(RangeView::from(&range))))
}
