use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_openai::error::OpenAIError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TIMEOUT_MESSAGE: &str = "Quiz generation took too long";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Generation timed out after {0} seconds")]
    GenerationTimeout(u64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Message safe to hand back to the client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(message) => message.clone(),
            AppError::GenerationTimeout(_) => TIMEOUT_MESSAGE.to_string(),
            AppError::DatabaseError(_) | AppError::Configuration(_) | AppError::InternalError(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::GenerationTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures between prompt submission and a usable quiz. The pipeline turns
/// every one of these except `Timeout` into an `ok: false` result carrying
/// `to_string()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Generation service did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse generation response: {0}")]
    Parse(String),

    /// The service reported success but put an error string where the
    /// questions belong.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response format")]
    InvalidFormat,
}

impl From<OpenAIError> for GenerationError {
    fn from(err: OpenAIError) -> Self {
        GenerationError::Service(err.to_string())
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Parse(err.to_string())
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;
