//! Handler functions for the open-position API.
//!
//! These functions fetch position data from the collaborator and format
//! the responses. Listing failures degrade to an empty list: browsing
//! must never block on an upstream hiccup.

use std::sync::Arc;

use adapters::models::{Position, PositionFilters};
use axum::extract::{Query, State};
use axum::Json;
use tracing::warn;

use crate::AppState;

/// GET /api/position
pub async fn list_positions(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<PositionFilters>,
) -> Json<Vec<Position>> {
    match state.api.list_positions(&filters).await {
        Ok(positions) => Json(positions),
        Err(err) => {
            warn!(%err, "position listing degraded to empty");
            Json(Vec::new())
        }
    }
}
