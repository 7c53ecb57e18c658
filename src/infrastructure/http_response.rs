// HTTP response utilities for file downloads
use axum::{
    body::Body,
    http::{header, Response, StatusCode},
};

/// Build a download response carrying `bytes` as an attachment named `file_name`.
pub fn attachment_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    file_name: &str,
) -> Result<Response<Body>, StatusCode> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
        )
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
