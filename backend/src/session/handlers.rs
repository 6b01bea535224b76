//! Handler functions for session-related API endpoints.
//!
//! These functions process incoming requests for login, logout, session
//! inspection, path reconciliation, and the one-shot notice, parse request
//! data, and interact with the `session::service` for the core logic.

use std::sync::Arc;

use adapters::models::{AdminCredentials, ApplicantCredentials};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::PortalError;
use crate::services::notices::TransientNotice;
use crate::services::reconciler::Reconciliation;
use crate::session::models::{AdminRole, NavigationState, SessionIdentity};
use crate::AppState;

/// Applicant login payload.
#[derive(Debug, Deserialize)]
pub struct ApplicantLoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Administrator login payload. No remember-me choice here.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// Path reconciliation payload.
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub path: String,
}

/// Serializable snapshot of the current session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    pub navigation: NavigationState,
}

impl SessionView {
    fn of(identity: &SessionIdentity, navigation: NavigationState) -> Self {
        let (kind, display_name) = match identity {
            SessionIdentity::None => ("none", None),
            SessionIdentity::Applicant(applicant) => {
                ("applicant", Some(applicant.display_name.clone()))
            }
            SessionIdentity::Administrator(admin) => {
                ("administrator", Some(admin.display_name.clone()))
            }
        };
        Self {
            authenticated: identity.is_authenticated(),
            kind,
            display_name,
            role: identity.role(),
            navigation,
        }
    }
}

/// POST /api/session/login
pub async fn login_applicant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ApplicantLoginRequest>,
) -> Result<Json<SessionView>, PortalError> {
    let credentials = ApplicantCredentials {
        email: payload.email,
        password: payload.password,
    };
    let identity = state
        .session
        .login_applicant(&credentials, payload.remember)
        .await?;
    Ok(Json(SessionView::of(&identity, state.session.navigation())))
}

/// POST /api/session/admin/login
pub async fn login_administrator(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Json<SessionView>, PortalError> {
    let credentials = AdminCredentials {
        username: payload.username,
        password: payload.password,
    };
    let identity = state.session.login_administrator(&credentials).await?;
    Ok(Json(SessionView::of(&identity, state.session.navigation())))
}

/// POST /api/session/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.logout();
    StatusCode::NO_CONTENT
}

/// GET /api/session
pub async fn current_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let identity = state.session.identity();
    Json(SessionView::of(&identity, state.session.navigation()))
}

/// POST /api/session/reconcile
///
/// The navigation surface: a path comes in, the corrected location goes
/// out for the caller to apply.
pub async fn reconcile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReconcileRequest>,
) -> Json<Reconciliation> {
    Json(state.session.reconcile(&payload.path))
}

/// GET /api/session/notice
pub async fn take_notice(State(state): State<Arc<AppState>>) -> Json<Option<TransientNotice>> {
    Json(state.session.take_notice())
}
