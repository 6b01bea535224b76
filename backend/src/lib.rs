//! Engine crate for the Convoca portal backend.
//!
//! Exposes the session/role/route reconciliation engine, the admission
//! control logic, and the thin HTTP surface over them, so the binary and
//! the integration tests drive the same public modules.

pub mod api;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod session;

use std::sync::Arc;

use adapters::ApiClient;

use crate::services::admission::AdmissionService;
use crate::session::SessionService;

/// Shared application state handed to every handler.
pub struct AppState {
    pub session: SessionService,
    pub admission: AdmissionService,
    pub api: Arc<dyn ApiClient>,
}

impl AppState {
    pub fn new(session: SessionService, api: Arc<dyn ApiClient>) -> Self {
        Self {
            session,
            admission: AdmissionService::new(Arc::clone(&api)),
            api,
        }
    }
}
