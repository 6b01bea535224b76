//! HTTP implementation of the collaborator client.
//!
//! Thin `reqwest` wrapper around the portal's upstream service. Every
//! transport-level failure maps to [`AdapterError::Transport`], every
//! non-success response to [`AdapterError::Api`] with whatever message body
//! could be extracted. No retries: callers decide how a failure degrades.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::errors::AdapterError;
use crate::models::{
    AccountRecord, AdminCredentials, ApplicantCredentials, CvStatus, Position, PositionFilters,
    RegistrationRecord, RegistrationRequest,
};
use crate::ApiClient;

/// Collaborator client over HTTP.
pub struct HttpApiClient {
    base_url: String,
    client: Client,
}

impl HttpApiClient {
    /// Creates a client against `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AdapterError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AdapterError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| AdapterError::Transport(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdapterError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| AdapterError::Transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AdapterError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| AdapterError::Transport(err.to_string()))?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn login_applicant(
        &self,
        credentials: &ApplicantCredentials,
    ) -> Result<AccountRecord, AdapterError> {
        self.post_json("/auth/applicant/login", credentials).await
    }

    async fn login_administrator(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<AccountRecord, AdapterError> {
        self.post_json("/auth/admin/login", credentials).await
    }

    async fn list_positions(
        &self,
        filters: &PositionFilters,
    ) -> Result<Vec<Position>, AdapterError> {
        let response = self
            .client
            .get(self.url("/positions"))
            .query(filters)
            .send()
            .await
            .map_err(|err| AdapterError::Transport(err.to_string()))?;
        Self::decode(response).await
    }

    async fn fetch_applicant_registrations(
        &self,
        applicant_id: i64,
    ) -> Result<Vec<RegistrationRecord>, AdapterError> {
        self.get_json(&format!("/applicants/{applicant_id}/registrations"))
            .await
    }

    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationRecord, AdapterError> {
        self.post_json("/registrations", request).await
    }

    async fn fetch_cv_status(&self, applicant_id: i64) -> Result<CvStatus, AdapterError> {
        self.get_json(&format!("/applicants/{applicant_id}/cv"))
            .await
    }
}
