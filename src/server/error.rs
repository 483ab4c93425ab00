//! Error responses for the HTTP API

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use repurpose_core::ServiceError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Service(ServiceError::Storage(detail)) => {
                tracing::error!("Storage error: {detail}");
                "Storage error".to_string()
            }
            ApiError::Service(err) if status.is_server_error() => {
                tracing::error!("Request failed: {err}");
                err.to_string()
            }
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
