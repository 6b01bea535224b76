//! Middleware for protecting applicant-only routes.
//!
//! Registration endpoints require an authenticated applicant session;
//! anything else is turned away with a 401 before the handler runs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::PortalError;
use crate::session::errors::SessionError;
use crate::session::models::SessionIdentity;
use crate::AppState;

/// Rejects requests unless the current session is an authenticated
/// applicant.
pub async fn require_applicant<B>(
    State(state): State<Arc<AppState>>,
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, PortalError> {
    let identity = state.session.identity();
    let allowed = matches!(identity, SessionIdentity::Applicant(_)) && identity.is_authenticated();
    if !allowed {
        return Err(SessionError::NotAuthenticated.into());
    }
    Ok(next.run(request).await)
}
