//! Handler functions for the registration API.
//!
//! These functions drive the admission-controlled registration flow:
//! the pre-check when the user initiates, and the guarded submission.
//! A collaborator 401 on any of them tears the session down and leaves
//! the one-shot expiry notice for the next load.

use std::sync::Arc;

use adapters::models::RegistrationRecord;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::errors::PortalError;
use crate::session::errors::SessionError;
use crate::session::models::SessionIdentity;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegistrationPayload {
    pub position_id: i64,
}

fn applicant_id(state: &AppState) -> Result<i64, PortalError> {
    match state.session.identity() {
        SessionIdentity::Applicant(applicant) if applicant.id != 0 => Ok(applicant.id),
        _ => Err(SessionError::NotAuthenticated.into()),
    }
}

/// Tears the session down when the collaborator rejected its credential.
fn note_expiry(state: &AppState, err: PortalError) -> PortalError {
    if let PortalError::Adapter(adapter_err) = &err {
        if adapter_err.is_unauthorized() {
            state
                .session
                .expire("your session has expired, sign in again");
        }
    }
    err
}

/// GET /api/registration
pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RegistrationRecord>>, PortalError> {
    let applicant_id = applicant_id(&state)?;
    let registrations = state
        .api
        .fetch_applicant_registrations(applicant_id)
        .await
        .map_err(|err| note_expiry(&state, err.into()))?;
    Ok(Json(registrations))
}

/// POST /api/registration/check
///
/// First admission check, run when the user initiates a registration; the
/// outcome decides which confirmation dialog to show.
pub async fn check_registration(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<StatusCode, PortalError> {
    let applicant_id = applicant_id(&state)?;
    state
        .admission
        .initiate(applicant_id, payload.position_id)
        .await
        .map_err(|err| note_expiry(&state, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/registration
///
/// The guarded write: resolves the applicant's CV, then lets the admission
/// controller re-check against a fresh snapshot before submitting.
pub async fn submit_registration(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<Json<RegistrationRecord>, PortalError> {
    let applicant_id = applicant_id(&state)?;
    let identity = state.session.identity();

    let cv = state
        .api
        .fetch_cv_status(applicant_id)
        .await
        .map_err(|err| note_expiry(&state, err.into()))?;

    let record = state
        .admission
        .submit(&identity, payload.position_id, cv.id)
        .await
        .map_err(|err| note_expiry(&state, err))?;
    Ok(Json(record))
}
