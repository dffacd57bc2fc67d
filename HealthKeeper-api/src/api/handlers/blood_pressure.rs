use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, instrument};

use health_keeper_domain::services::date_range::now_in_china;
use health_keeper_domain::services::{DeleteSelection, BloodPressureServiceTrait};

use super::errors::ErrorResponse;
use super::export::attachment;
use super::range::resolve_query;
use crate::entities::common::{CreatedResponse, DataStatus, DeleteResponse, RangeQuery, RangeView};
use crate::entities::blood_pressure::{
    CreateBloodPressureRequest, BloodPressureChartResponse, BloodPressureListResponse, BloodPressureReadingView,
    BloodPressureSummaryResponse, BloodPressureSummaryView,
};

/// Service type for dependency injection
pub type BloodPressureService = Arc<dyn BloodPressureServiceTrait + Send + Sync>;

/// Record a new blood pressure reading
#[utoipa::path(
    post,
    path = "/api/v1/bloodpressure",
    request_body = CreateBloodPressureRequest,
    responses(
        (status = 201, description = "Blood pressure reading recorded", body = CreatedResponse),
        (status = 400, description = "Invalid reading", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, request))]
pub async fn create_blood_pressure(
    State(service): State<BloodPressureService>,
    Json(request): Json<CreateBloodPressureRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let entry = request.into_entry(now_in_china())?;
    let sequence = service.record_reading(entry).await?;

    info!("Blood pressure reading recorded with sequence {}", sequence);
    Ok((StatusCode::CREATED, Json(CreatedResponse { sequence })))
}

/// List blood pressure readings in the selected range, newest first by date then time
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure",
    params(RangeQuery),
    responses(
        (status = 200, description = "Blood pressure readings retrieved", body = BloodPressureListResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn list_blood_pressure(
    State(service): State<BloodPressureService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;

    let response = BloodPressureListResponse {
        status: DataStatus::of(set.is_empty()),
        range: RangeView::from(&set.range),
        delete_choices: set.delete_choices(),
        readings: set.records.iter().map(BloodPressureReadingView::from).collect(),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Delete a blood pressure reading; `请选择` is accepted and does nothing
#[utoipa::path(
    delete,
    path = "/api/v1/bloodpressure/{selection}",
    params(
        ("selection" = String, Path, description = "Sequence number, or 请选择 for no selection")
    ),
    responses(
        (status = 200, description = "Delete processed", body = DeleteResponse),
        (status = 400, description = "Selection is not a sequence number", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn delete_blood_pressure(
    State(service): State<BloodPressureService>,
    Path(selection): Path<String>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let selection: DeleteSelection = selection.parse()?;
    let outcome = service.delete_reading(selection).await?;
    Ok((StatusCode::OK, Json(DeleteResponse::from(outcome))))
}

/// Delete submitted with no reading selected
#[utoipa::path(
    delete,
    path = "/api/v1/bloodpressure",
    responses(
        (status = 200, description = "Nothing selected, nothing deleted", body = DeleteResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn delete_blood_pressure_unselected(
    State(service): State<BloodPressureService>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let outcome = service.delete_reading(DeleteSelection::Placeholder).await?;
    Ok((StatusCode::OK, Json(DeleteResponse::from(outcome))))
}

/// Average systolic, diastolic and heart rate with the category of the mean
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure/summary",
    params(RangeQuery),
    responses(
        (status = 200, description = "Averages computed", body = BloodPressureSummaryResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn blood_pressure_summary(
    State(service): State<BloodPressureService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let summary = service.summarize(&set.records);

    let response = BloodPressureSummaryResponse {
        status: DataStatus::of(summary.is_none()),
        range: RangeView::from(&set.range),
        summary: summary.map(BloodPressureSummaryView::from),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Systolic and diastolic trend chart data
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure/chart",
    params(RangeQuery),
    responses(
        (status = 200, description = "Chart data prepared", body = BloodPressureChartResponse),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn blood_pressure_chart(
    State(service): State<BloodPressureService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let chart = service.chart(&set.records);

    Ok((
        StatusCode::OK,
        Json(BloodPressureChartResponse::new(RangeView::from(&set.range), chart)),
    ))
}

/// Download the blood pressure readings in range as a spreadsheet
#[utoipa::path(
    get,
    path = "/api/v1/bloodpressure/export",
    params(RangeQuery),
    responses(
        (status = 200, description = "Spreadsheet of the readings in range", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Invalid range", body = ErrorResponse),
        (status = 502, description = "Table store failed", body = ErrorResponse),
        (status = 500, description = "Spreadsheet could not be written", body = ErrorResponse),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn export_blood_pressure(
    State(service): State<BloodPressureService>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ErrorResponse> {
    let range = resolve_query(&query)?;
    let set = service.list_readings(range).await?;
    let artifact = service.export(&set.records)?;

    info!("Exporting {} blood pressure readings", set.len());
    Ok(attachment(artifact))
}
