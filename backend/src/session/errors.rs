//! Custom error types specific to session failures.
//!
//! This module defines the errors that can occur while establishing,
//! restoring, or tearing down a session, providing clear and structured
//! error responses.

use thiserror::Error;

/// Errors produced by the session service.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation requires an authenticated identity.
    #[error("not authenticated")]
    NotAuthenticated,

    /// A persisted session record could not be parsed.
    ///
    /// Never propagated out of rehydration; kept for callers that parse
    /// records directly.
    #[error("malformed persisted record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// A collaborator call failed during login.
    #[error(transparent)]
    Adapter(#[from] adapters::errors::AdapterError),
}
