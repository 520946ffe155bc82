use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Submission rejected: {unanswered} question(s) unanswered")]
    SubmitRejected { unanswered: usize },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Api { .. } => "API_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::SubmitRejected { .. } => "SUBMIT_REJECTED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Maps a non-2xx response onto an error variant.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body.trim().to_string()
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY => AppError::ValidationError(message),
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status, "")
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
