use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use mosley_core::ScoringError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    /// A collaborator (store or arbiter) failed.
    BadGateway(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) | Self::BadGateway(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        let message = err.to_string();
        match err {
            ScoringError::UnknownCompetitor(_) => Self::NotFound(message),
            ScoringError::SplitAlreadyApplied { .. } => Self::Conflict(message),
            ScoringError::ExternalFailure(_) => Self::BadGateway(message),
            _ => Self::BadRequest(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            Self::BadGateway(m) => {
                tracing::error!(error = %m, "Collaborator failure");
                (StatusCode::BAD_GATEWAY, m.clone())
            },
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
