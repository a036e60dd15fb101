use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or unsupported query parameter.
    #[error("{0}")]
    Validation(String),

    /// The upstream job board could not be reached or answered with an error.
    #[error("Error: {0}")]
    Transport(String),

    /// The upstream document is unusable as a whole.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Error: {0}")]
    Credentials(String),

    #[error("Route not found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Transport(_) | AppError::Parse(_) | AppError::Credentials(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Transport(format!("request timed out: {e}"))
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }

        let body = axum::Json(ApiResponse::<()>::failed(self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = AppError::Validation("Page must be a positive integer".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Page must be a positive integer");
    }

    #[test]
    fn upstream_failures_map_to_server_error() {
        assert_eq!(
            AppError::Transport("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Parse("expected value".into()).to_string(),
            "Failed to parse response: expected value"
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
