use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("DNS resolution failed for {host}")]
    Dns { host: String },

    #[error("Upstream catalog request timed out")]
    UpstreamTimeout,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Catalog API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Fixed response bodies for 5xx outcomes. The concrete failure is logged;
/// callers only ever see these.
const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch recommendations";
const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Dns { .. }
            | AppError::UpstreamTimeout
            | AppError::HttpClient(_)
            | AppError::ExternalApi(_) => {
                tracing::error!(error = %self, "Upstream catalog failure");
                (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE_MESSAGE.to_string())
            }
            AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
