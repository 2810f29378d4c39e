use std::path::PathBuf;

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

/// Rejections on the create path. The messages are the response bodies.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing Location or ReviewBody")]
    MissingField,

    #[error("Invalid Location")]
    InvalidLocation,
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid {param} '{value}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        param: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Review {review_id} has unparseable Timestamp '{timestamp}': {source}")]
    InvalidTimestamp {
        review_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Error, Debug)]
#[error("Failed to load reviews from {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

#[derive(Error, Debug)]
#[error("Invalid {key} value '{value}': {message}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("Request body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("Failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Filter(FilterError::InvalidDate { .. }) => StatusCode::BAD_REQUEST,
            AppError::Filter(FilterError::InvalidTimestamp { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Encoding(_) | AppError::Form(_) | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}
