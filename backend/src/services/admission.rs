//! Admission control for position registrations.
//!
//! Decides whether an applicant may register for an open position. The
//! duplicate check runs twice per registration: once when the user initiates
//! (to pick the confirmation dialog) and once immediately before the write,
//! each time against a freshly fetched registration list, so state that
//! changed in between (say, a concurrent submission from another tab) is
//! still caught.
//!
//! Every denial is terminal: surfaced to the user verbatim, never retried.
//!
//! The check guards one registration per position only. UI copy mentions a
//! cap of two registrations per zonal office; no such rule exists in this
//! logic and none is added here.

use std::collections::HashSet;
use std::sync::Arc;

use adapters::models::{RegistrationRecord, RegistrationRequest};
use adapters::ApiClient;
use thiserror::Error;

use crate::errors::PortalError;
use crate::session::models::SessionIdentity;

/// Business-rule rejections of a registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmissionError {
    /// The applicant already holds a registration for this position.
    #[error("already registered for this position")]
    AlreadyRegistered,

    /// Registration requires a CV on file.
    #[error("a CV is required before registering")]
    MissingCv,

    /// The target position could not be resolved.
    #[error("the position could not be resolved")]
    MissingPosition,

    /// Registration requires an authenticated applicant.
    #[error("an applicant session is required")]
    NotAuthenticated,
}

/// Pure duplicate check over a snapshot of the applicant's registrations.
pub fn can_register(
    position_id: i64,
    registrations: &[RegistrationRecord],
) -> Result<(), AdmissionError> {
    let held: HashSet<i64> = registrations.iter().map(|r| r.position_id).collect();
    if held.contains(&position_id) {
        return Err(AdmissionError::AlreadyRegistered);
    }
    Ok(())
}

/// Registration flow over the collaborator client.
pub struct AdmissionService {
    api: Arc<dyn ApiClient>,
}

impl AdmissionService {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// First admission check, run when the user initiates a registration.
    ///
    /// Fetches a fresh registration list; the outcome decides which
    /// confirmation dialog the caller shows.
    pub async fn initiate(&self, applicant_id: i64, position_id: i64) -> Result<(), PortalError> {
        let registrations = self.api.fetch_applicant_registrations(applicant_id).await?;
        can_register(position_id, &registrations)?;
        Ok(())
    }

    /// Submits a registration, re-running the admission check against a
    /// fresh snapshot immediately before the write.
    pub async fn submit(
        &self,
        identity: &SessionIdentity,
        position_id: i64,
        cv_id: i64,
    ) -> Result<RegistrationRecord, PortalError> {
        let applicant = match identity {
            SessionIdentity::Applicant(applicant) if identity.is_authenticated() => applicant,
            _ => return Err(AdmissionError::NotAuthenticated.into()),
        };
        if cv_id == 0 {
            return Err(AdmissionError::MissingCv.into());
        }
        if position_id == 0 {
            return Err(AdmissionError::MissingPosition.into());
        }

        let registrations = self.api.fetch_applicant_registrations(applicant.id).await?;
        can_register(position_id, &registrations)?;

        let record = self
            .api
            .submit_registration(&RegistrationRequest {
                position_id,
                applicant_id: applicant.id,
                cv_id,
            })
            .await?;
        Ok(record)
    }
}
