//! Defines the HTTP routes specifically for session management.
//!
//! These routes handle login, logout, session inspection, path
//! reconciliation, and the one-shot notice. They are designed to be
//! nested into the main Axum router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::AppState;

pub fn session_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::current_session))
        .route("/login", post(handlers::login_applicant))
        .route("/admin/login", post(handlers::login_administrator))
        .route("/logout", post(handlers::logout))
        .route("/reconcile", post(handlers::reconcile))
        .route("/notice", get(handlers::take_notice))
}
