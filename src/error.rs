use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    pub fn log_safe(&self) -> String {
        match self {
            // IO errors carry absolute paths of the host
            Error::Io(_) => "File system operation failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password") || lower.contains("secret") || lower.contains("token")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Dataset(msg) => format!("Dataset error: {msg}"),
            Error::Json(e) => format!("JSON error: {e}"),
            Error::Yaml(e) => format!("YAML error: {e}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::NotFound(msg) => format!("Not found: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request error: {}", self.log_safe());
        } else {
            tracing::debug!("Request error: {}", self.log_safe());
        }

        let error_message = match &self {
            Error::NotFound(msg) | Error::Validation(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
