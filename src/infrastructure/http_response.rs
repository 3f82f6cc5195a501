// HTTP response utilities for JSON report payloads
use crate::application::error::ReportError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Serialize a report, or map its failure to a status code with an error body
pub fn report_response<T: Serialize>(result: Result<T, ReportError>) -> Response {
    match result {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(&e),
    }
}

pub fn error_response(err: &ReportError) -> Response {
    let status = match err {
        ReportError::InvalidParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ReportError::StoreUnavailable(source) => {
            tracing::warn!("Report query failed: {:#}", source);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
