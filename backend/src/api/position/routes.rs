//! Defines the HTTP routes for browsing open positions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::AppState;

pub fn position_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(handlers::list_positions))
}
