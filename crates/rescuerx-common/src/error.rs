use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RescueError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document was not present at its expected location.
    #[error("Document not found: {0}")]
    MissingDocument(String),

    /// None of the known key-name variants matched the document.
    #[error("Unrecognized schema: {0}")]
    UnrecognizedSchema(String),

    /// Drug or disease lookup found nothing.
    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Invalid disease id: {0}")]
    InvalidDiseaseId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RescueError>;

/// Error returned from HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl From<RescueError> for ApiError {
    fn from(err: RescueError) -> Self {
        let status = match &err {
            RescueError::MissingDocument(_) | RescueError::NoMatch(_) => StatusCode::NOT_FOUND,
            RescueError::InvalidDiseaseId(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
