//! HTTP-facing errors. The repository itself never fails; everything here
//! comes from request validation or a missing note.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use notes_types::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Note not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Query(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Json(rejection) => rejection.body_text(),
            ApiError::Query(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status != StatusCode::NOT_FOUND {
            log::debug!("[HTTP] Rejected request ({}): {}", status, self);
        }
        let body = ErrorBody {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
