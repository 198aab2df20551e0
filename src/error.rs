use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Upstream returned a malformed body: {0}")]
    UpstreamMalformed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Error response structure - just a message, never the underlying cause
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamUnreachable(_) | Self::UpstreamMalformed(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to callers. Upstream bodies and causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::ConfigurationMissing(_) => "News upstream is not configured".to_string(),
            Self::UpstreamUnreachable(_) | Self::UpstreamMalformed(_) => {
                "Failed to reach the news upstream".to_string()
            }
            Self::NotFound(_) => "Not found".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.public_message(),
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            );
        } else {
            tracing::warn!(error = %self, status = %status.as_u16(), "Request rejected");
        }

        let mut response = (status, Json(self.to_response())).into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        response
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
