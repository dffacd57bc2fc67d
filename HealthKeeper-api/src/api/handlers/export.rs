use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use health_keeper_domain::services::export::ExportArtifact;

/// `Content-Disposition` value with an RFC 5987 encoded UTF-8 file name
pub fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

/// Send an export as a file download
pub fn attachment(artifact: ExportArtifact) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response()
}
