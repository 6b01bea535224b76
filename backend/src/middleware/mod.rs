//! General-purpose middleware for the API.
//!
//! This module contains reusable middleware components applied to the whole
//! Axum router; currently request logging.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

/// Logs every request with its method, path, and response status.
pub async fn log_requests<B>(request: Request<B>, next: Next<B>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    debug!(%method, %path, status = %response.status(), "request");
    response
}
