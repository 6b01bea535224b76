//! Defines the HTTP routes for the registration flow.
//!
//! Every route here requires an authenticated applicant session; the
//! session middleware turns everything else away before the handlers run.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use crate::session::middleware::require_applicant;
use crate::AppState;

pub fn registration_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_registrations).post(handlers::submit_registration),
        )
        .route("/check", post(handlers::check_registration))
        .route_layer(middleware::from_fn_with_state(state, require_applicant))
}
