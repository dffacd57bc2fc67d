use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_keeper_domain::services::date_range::now_in_china;
use health_keeper_domain::services::{DeleteSelection, GlucoseServiceTrait};

use super::errors::ErrorResponse;
use super::export::attachment;
use super::range::resolve_query;
use crate::entities::common::{CreatedResponse, DataStatus, DeleteResponse, RangeQuery, RangeView};
use crate::entities::glucose::{
    CreateGlucoseRequest, GlucoseChartResponse, GlucoseListResponse, GlucoseReadingView,
    GlucoseSummaryResponse, GlucoseSummaryView,
};

/// Service type for dependency injection
pub type GlucoseService = Arc<dyn GlucoseServiceTrait + Send + Sync>;

/// Record a new glucose reading
#[utoipa::path(
    post,
    path = "/api/v1/glucose",
    request_body = CreateGlucoseRequest,
    responses(
        (status = 201, description = "Glucose reading recorded", body = CreatedResponse),
        (status = 400, description = "Invalid reading", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service, request))]
pub async fn create_glucose(
    State(service): State<GlucoseService>,
    Json(request): Json<CreateGlucoseRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let entry = request.into_entry(now_in_china())?;
    let sequence = service.record_reading(entry).await?;

    info!("Glucose reading recorded with sequence {}", sequence);
    Ok((StatusCode::CREATED, Json(CreatedResponse { sequence })))
}

/// List glucose readings in the selected range, newest day first
#[utoipa::path(
    get,
    path = "/api/v1/glucose",
    params(RangeQuery),
    responses(
        (status = 200, description = "Glucose readings retrieved", body = GlucoseListResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn list_glucose(
    State(service): State<GlucoseService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;

    let response = GlucoseListResponse {
        status: DataStatus::of(set.is_empty()),
        range: RangeView::from(&set.range),
        delete_choices: set.delete_choices(),
        readings: set.records.iter().map(GlucoseReadingView::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Delete a glucose reading; `请选择` is accepted and does nothing
#[utoipa::path(
    delete,
    path = "/api/v1/glucose/{selection}",
    params(
        ("selection" = String, Path, description = "Sequence number, or 请选择 for no selection")
    ),
    responses(
        (status = 200, description = "Delete processed", body = DeleteResponse),
        (status = 400, description = "Selection is not a sequence number", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn delete_glucose(
    State(service): State<GlucoseService>,
    Path(selection): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let selection: DeleteSelection = selection.parse()?;
    let outcome = service.delete_reading(selection).await?;
    Ok((StatusCode::OK, Json(DeleteResponse::from(outcome))))
}

/// Delete submitted with no reading selected
#[utoipa::path(
    delete,
    path = "/api/v1/glucose",
    responses(
        (status = 200, description = "Nothing selected, nothing deleted", body = DeleteResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn delete_glucose_unselected(
    State(service): State<GlucoseService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let outcome = service.delete_reading(DeleteSelection::Placeholder).await?;
    Ok((StatusCode::OK, Json(DeleteResponse::from(outcome))))
}

/// Average glucose overall and per measurement period
#[utoipa::path(
    get,
    path = "/api/v1/glucose/summary",
    params(RangeQuery),
    responses(
        (status = 200, description = "Averages computed", body = GlucoseSummaryResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn glucose_summary(
    State(service): State<GlucoseService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let summary = service.summarize(&set.records);

    let response = GlucoseSummaryResponse {
        status: DataStatus::of(summary.is_none()),
        range: RangeView::from(&set.range),
        summary: summary.map(GlucoseSummaryView::from),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Glucose trend chart data
#[utoipa::path(
    get,
    path = "/api/v1/glucose/chart",
    params(RangeQuery),
    responses(
        (status = 200, description = "Chart data prepared", body = GlucoseChartResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn glucose_chart(
    State(service): State<GlucoseService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let chart = service.chart(&set.records);

    Ok((
        StatusCode::OK,
        Json(GlucoseChartResponse::new(RangeView::from(&set.range), chart)),
    ))
}

/// Download the glucose readings in range as a spreadsheet
#[utoipa::path(
    get,
    path = "/api/v1/glucose/export",
    params(RangeQuery),
    responses(
        (status = 200, description = "Spreadsheet of the readings in range", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
        (status = 500, description = "Spreadsheet could not be written", body = ErrorResponse),
    ),
    tag = "glucose"
)]
#[instrument(skip(service))]
pub async fn export_glucose(
    State(service): State<GlucoseService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let artifact = service.export(&set.records)?;

    info!("Exporting {} glucose readings", set.len());
    Ok(attachment(artifact))
}
