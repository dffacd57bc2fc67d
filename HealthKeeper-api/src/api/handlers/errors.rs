use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use health_keeper_domain::services::ServiceError;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a store error response
    pub fn store_error(message: &str) -> Self {
        Self {
            error: "store_error".to_string(),
            message: format!("数据存取失败，请稍后重试：{}", message),
            details: None,
        }
    }

    /// Create an export error response
    pub fn export_error(message: &str) -> Self {
        Self {
            error: "export_error".to_string(),
            message: format!("导出失败：{}", message),
            details: None,
        }
    }

    fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "store_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => {
                warn!("Rejected request: {}", message);
                ErrorResponse::validation_error(&message)
            }
            ServiceError::Store(e) => {
                error!("Store operation failed: {}", e);
                ErrorResponse::store_error(&e.to_string())
            }
            ServiceError::Export(e) => {
                error!("Export failed: {}", e);
                ErrorResponse::export_error(&e.to_string())
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
