use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use overlay_core::error::CoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Backend error [{code}]: {message}")]
    Backend { code: &'static str, message: String },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoActor => ApiError::Forbidden(err.to_string()),
            other => ApiError::Backend {
                code: other.code(),
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest".to_string(), msg)
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "Forbidden".to_string(), msg)
            }
            ApiError::Backend { code, message } => {
                tracing::error!("Backend error [{}]: {}", code, message);
                (StatusCode::INTERNAL_SERVER_ERROR, code.to_string(), message)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type,
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        let response = ApiError::from(CoreError::RecordSource("timeout".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::from(CoreError::NoActor).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = ApiError::BadRequest("pid missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
