use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health and range
        crate::api::handlers::health::health_check,
        crate::api::handlers::range::get_range,

        // Glucose endpoints
        crate::api::handlers::glucose::create_glucose,
        crate::api::handlers::glucose::list_glucose,
        crate::api::handlers::glucose::delete_glucose,
        crate::api::handlers::glucose::delete_glucose_unselected,
        crate::api::handlers::glucose::glucose_summary,
        crate::api::handlers::glucose::glucose_chart,
        crate::api::handlers::glucose::export_glucose,

        // Blood pressure endpoints
        crate::api::handlers::blood_pressure::create_blood_pressure,
        crate::api::handlers::blood_pressure::list_blood_pressure,
        crate::api::handlers::blood_pressure::delete_blood_pressure,
        crate::api::handlers::blood_pressure::delete_blood_pressure_unselected,
        crate::api::handlers::blood_pressure::blood_pressure_summary,
        crate::api::handlers::blood_pressure::blood_pressure_chart,
        crate::api::handlers::blood_pressure::export_blood_pressure,
    ),
    components(
        schemas(
            // Shared
            crate::entities::common::RangeQuery,
            crate::entities::common::RangeView,
            crate::entities::common::DataStatus,
            crate::entities::common::CreatedResponse,
            crate::entities::common::DeleteResponse,
            crate::api::handlers::errors::ErrorResponse,
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,

            // Glucose
            crate::entities::glucose::CreateGlucoseRequest,
            crate::entities::glucose::GlucoseReadingView,
            crate::entities::glucose::GlucoseListResponse,
            crate::entities::glucose::PeriodAverageView,
            crate::entities::glucose::GlucoseSummaryView,
            crate::entities::glucose::GlucoseSummaryResponse,
            crate::entities::glucose::GlucosePointView,
            crate::entities::glucose::GlucoseChartResponse,

            // Blood pressure
            crate::entities::blood_pressure::CreateBloodPressureRequest,
            crate::entities::blood_pressure::BloodPressureReadingView,
            crate::entities::blood_pressure::BloodPressureListResponse,
            crate::entities::blood_pressure::BloodPressureSummaryView,
            crate::entities::blood_pressure::BloodPressureSummaryResponse,
            crate::entities::blood_pressure::SeriesPointView,
            crate::entities::blood_pressure::BloodPressureChartResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "range", description = "Date range resolution"),
        (name = "glucose", description = "Blood glucose records"),
        (name = "blood_pressure", description = "Blood pressure records")
    ),
    info(
        title = "HealthKeeper API",
        version = "0.1.0",
        description = "Record and review blood glucose and blood pressure readings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
