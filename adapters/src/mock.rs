//! In-memory collaborator client for tests.
//!
//! Seedable accounts, positions and registrations, plus failure injection so
//! flow tests can exercise transport and credential-expiry paths without a
//! network.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::AdapterError;
use crate::models::{
    AccountRecord, AdminCredentials, ApplicantCredentials, CvStatus, Position, PositionFilters,
    RegistrationRecord, RegistrationRequest, RegistrationStatus,
};
use crate::ApiClient;

#[derive(Default)]
struct MockState {
    /// Applicant-login accounts keyed by email.
    accounts: HashMap<String, AccountRecord>,
    /// Administrator-login accounts keyed by username.
    admin_accounts: HashMap<String, AccountRecord>,
    positions: Vec<Position>,
    registrations: Vec<RegistrationRecord>,
    cv_status: HashMap<i64, CvStatus>,
    /// When set, every call fails with a transport error.
    fail_transport: bool,
    /// When set, every call fails with a 401 (expired credential).
    fail_unauthorized: bool,
    submitted: u64,
}

/// Collaborator client backed by in-process state.
#[derive(Default)]
pub struct MockApiClient {
    state: Mutex<MockState>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account returned by the applicant login for `email`.
    pub fn seed_account(&self, email: impl Into<String>, record: AccountRecord) {
        self.state.lock().accounts.insert(email.into(), record);
    }

    /// Seeds an account returned by the administrator login for `username`.
    pub fn seed_admin_account(&self, username: impl Into<String>, record: AccountRecord) {
        self.state
            .lock()
            .admin_accounts
            .insert(username.into(), record);
    }

    pub fn seed_position(&self, position: Position) {
        self.state.lock().positions.push(position);
    }

    pub fn seed_registration(&self, registration: RegistrationRecord) {
        self.state.lock().registrations.push(registration);
    }

    pub fn seed_cv_status(&self, applicant_id: i64, status: CvStatus) {
        self.state.lock().cv_status.insert(applicant_id, status);
    }

    /// All subsequent calls fail with a transport error.
    pub fn fail_with_transport(&self, fail: bool) {
        self.state.lock().fail_transport = fail;
    }

    /// All subsequent calls fail with a 401.
    pub fn fail_with_unauthorized(&self, fail: bool) {
        self.state.lock().fail_unauthorized = fail;
    }

    /// Number of registrations accepted so far (seeded ones included).
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.state.lock().registrations.len()
    }

    fn gate(state: &MockState) -> Result<(), AdapterError> {
        if state.fail_transport {
            return Err(AdapterError::Transport("connection refused".into()));
        }
        if state.fail_unauthorized {
            return Err(AdapterError::Api {
                status: 401,
                message: "credential expired".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn login_applicant(
        &self,
        credentials: &ApplicantCredentials,
    ) -> Result<AccountRecord, AdapterError> {
        let state = self.state.lock();
        Self::gate(&state)?;
        state
            .accounts
            .get(&credentials.email)
            .cloned()
            .ok_or(AdapterError::Api {
                status: 401,
                message: "invalid credentials".into(),
            })
    }

    async fn login_administrator(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<AccountRecord, AdapterError> {
        let state = self.state.lock();
        Self::gate(&state)?;
        state
            .admin_accounts
            .get(&credentials.username)
            .cloned()
            .ok_or(AdapterError::Api {
                status: 401,
                message: "invalid credentials".into(),
            })
    }

    async fn list_positions(
        &self,
        filters: &PositionFilters,
    ) -> Result<Vec<Position>, AdapterError> {
        let state = self.state.lock();
        Self::gate(&state)?;
        Ok(state
            .positions
            .iter()
            .filter(|p| !filters.only_active || p.active)
            .filter(|p| {
                filters
                    .zonal_office_id
                    .map_or(true, |office| p.zonal_office_id == Some(office))
            })
            .cloned()
            .collect())
    }

    async fn fetch_applicant_registrations(
        &self,
        applicant_id: i64,
    ) -> Result<Vec<RegistrationRecord>, AdapterError> {
        let state = self.state.lock();
        Self::gate(&state)?;
        Ok(state
            .registrations
            .iter()
            .filter(|r| r.applicant_id == applicant_id)
            .cloned()
            .collect())
    }

    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationRecord, AdapterError> {
        let mut state = self.state.lock();
        Self::gate(&state)?;
        state.submitted += 1;
        let record = RegistrationRecord {
            position_id: request.position_id,
            applicant_id: request.applicant_id,
            cv_id: request.cv_id,
            status: RegistrationStatus::Submitted,
            registration_number: Some(format!("REG-{:06}", state.submitted)),
        };
        state.registrations.push(record.clone());
        Ok(record)
    }

    async fn fetch_cv_status(&self, applicant_id: i64) -> Result<CvStatus, AdapterError> {
        let state = self.state.lock();
        Self::gate(&state)?;
        Ok(state
            .cv_status
            .get(&applicant_id)
            .copied()
            .unwrap_or(CvStatus {
                id: 0,
                complete: false,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_account_logs_in() {
        let client = MockApiClient::new();
        client.seed_account(
            "ana@example.com",
            AccountRecord {
                id: 7,
                display_name: "Ana Silva".into(),
                email: Some("ana@example.com".into()),
                user_type: None,
                zonal_office_id: None,
                zonal_office_name: None,
                token: Some("tok".into()),
            },
        );

        let record = client
            .login_applicant(&ApplicantCredentials {
                email: "ana@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(record.id, 7);

        let miss = client
            .login_applicant(&ApplicantCredentials {
                email: "other@example.com".into(),
                password: "pw".into(),
            })
            .await;
        assert!(matches!(miss, Err(AdapterError::Api { status: 401, .. })));
    }

    #[tokio::test]
    async fn transport_failure_is_injectable() {
        let client = MockApiClient::new();
        client.fail_with_transport(true);
        let result = client.list_positions(&PositionFilters::default()).await;
        assert!(matches!(result, Err(AdapterError::Transport(_))));

        client.fail_with_transport(false);
        assert!(client
            .list_positions(&PositionFilters::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn submit_assigns_registration_number() {
        let client = MockApiClient::new();
        let record = client
            .submit_registration(&RegistrationRequest {
                position_id: 4,
                applicant_id: 7,
                cv_id: 2,
            })
            .await
            .unwrap();
        assert_eq!(record.status, RegistrationStatus::Submitted);
        assert_eq!(record.registration_number.as_deref(), Some("REG-000001"));

        let mine = client.fetch_applicant_registrations(7).await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn missing_cv_reads_as_zero_id() {
        let client = MockApiClient::new();
        let status = client.fetch_cv_status(99).await.unwrap();
        assert_eq!(status.id, 0);
        assert!(!status.complete);
    }
}
