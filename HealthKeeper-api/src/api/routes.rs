use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::handlers::{blood_pressure, get_range, glucose, health};
use super::{AppServices, AppState};
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(services: AppServices) -> Router {
    debug!("Creating application router");

    let state = AppState {
        glucose: services.glucose,
        blood_pressure: services.blood_pressure,
    };

    // Specific paths before the parametrized delete route
    let api_routes = Router::new()
        .route("/range", get(get_range))
        .route(
            "/glucose",
            get(glucose::list_glucose)
                .post(glucose::create_glucose)
                .delete(glucose::delete_glucose_unselected),
        )
        .route("/glucose/summary", get(glucose::glucose_summary))
        .route("/glucose/chart", get(glucose::glucose_chart))
        .route("/glucose/export", get(glucose::export_glucose))
        .route(
            "/glucose/:selection",
            axum::routing::delete(glucose::delete_glucose),
        )
        .route(
            "/bloodpressure",
            get(blood_pressure::list_blood_pressure)
                .post(blood_pressure::create_blood_pressure)
                .delete(blood_pressure::delete_blood_pressure_unselected),
        )
        .route(
            "/bloodpressure/summary",
            get(blood_pressure::blood_pressure_summary),
        )
        .route("/bloodpressure/chart", get(blood_pressure::blood_pressure_chart))
        .route(
            "/bloodpressure/export",
            get(blood_pressure::export_blood_pressure),
        )
        .route(
            "/bloodpressure/:selection",
            axum::routing::delete(blood_pressure::delete_blood_pressure),
        );

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(services.health));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(configure_swagger_routes());

    debug!("Swagger UI merged");

    health::initialize_server_start_time();

    configure_middleware(app)
}

/// CORS, security headers and request tracing
pub fn configure_middleware(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    app.layer(security_headers)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
