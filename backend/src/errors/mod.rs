//! Global application error types and handlers.
//!
//! This module composes the per-concern errors into one backend-wide type
//! and provides the consistent mapping from failures to HTTP responses:
//! admission denials are surfaced verbatim, transport failures collapse to
//! a generic message, and missing authentication is a plain 401.

use adapters::errors::AdapterError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::services::admission::AdmissionError;
use crate::session::errors::SessionError;

/// Backend-wide error type.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl PortalError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Session(SessionError::NotAuthenticated) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::Session(SessionError::MalformedRecord(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "session state could not be restored".to_string(),
            ),
            Self::Session(SessionError::Adapter(err)) => Self::adapter_response(err),
            // Business-rule denials go out verbatim and are never retried.
            Self::Admission(AdmissionError::NotAuthenticated) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::Admission(AdmissionError::AlreadyRegistered) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            Self::Admission(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            Self::Adapter(err) => Self::adapter_response(err),
        }
    }

    fn adapter_response(err: &AdapterError) -> (StatusCode, String) {
        match err {
            // The transport detail is for the logs, not the user.
            AdapterError::Transport(_) | AdapterError::Serialization(_) => (
                StatusCode::BAD_GATEWAY,
                "the service is temporarily unavailable".to_string(),
            ),
            AdapterError::Api { status: 401, .. } => (
                StatusCode::UNAUTHORIZED,
                "the session is no longer valid".to_string(),
            ),
            AdapterError::Api { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                message.clone(),
            ),
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
