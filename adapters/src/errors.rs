//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur during collaborator calls or
//! store handling within the adapter layer, providing a unified error
//! handling mechanism for all external interactions.

use thiserror::Error;

/// Errors produced by collaborator clients and store adapters.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The collaborator could not be reached (connect, timeout, DNS).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The collaborator answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the collaborator.
        status: u16,
        /// Message body, as far as one could be extracted.
        message: String,
    },

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdapterError {
    /// True when the error is the collaborator rejecting the credential,
    /// i.e. the session should be treated as expired.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}
