//! Core `adapters` crate for abstracting the portal's external boundaries.
//!
//! This crate defines the `StoreBackend` trait, which outlines a single
//! retention tier of the durable key-value store, and the `ApiClient` trait,
//! which covers every collaborator call the portal engine makes, and provides
//! a central point for accessing concrete implementations (file-backed and
//! in-memory tiers, HTTP and mock clients).

pub mod errors;
pub mod models;

pub mod ephemeral;
pub mod persistent;
pub mod tiered;

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::models::{
    AccountRecord, AdminCredentials, ApplicantCredentials, CvStatus, Position, PositionFilters,
    RegistrationRecord, RegistrationRequest,
};

/// A single retention tier of the durable store.
///
/// The surface is deliberately infallible: storage is an amenity, not a
/// dependency. Implementations swallow their own I/O failures and log them
/// rather than propagating errors into the session engine.
pub trait StoreBackend: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str);
}

impl<T: StoreBackend + ?Sized> StoreBackend for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Collaborator surface consumed by the portal engine.
///
/// Implementations: [`http::HttpApiClient`] for the real service,
/// [`mock::MockApiClient`] for tests.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Authenticates an applicant. The returned record may turn out to be an
    /// administrative account; callers classify it before persisting.
    async fn login_applicant(
        &self,
        credentials: &ApplicantCredentials,
    ) -> Result<AccountRecord, AdapterError>;

    /// Authenticates an administrator.
    async fn login_administrator(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<AccountRecord, AdapterError>;

    /// Lists open positions matching `filters`.
    async fn list_positions(
        &self,
        filters: &PositionFilters,
    ) -> Result<Vec<Position>, AdapterError>;

    /// Fetches a fresh snapshot of the applicant's registrations.
    async fn fetch_applicant_registrations(
        &self,
        applicant_id: i64,
    ) -> Result<Vec<RegistrationRecord>, AdapterError>;

    /// Submits a new registration and returns the stored record.
    async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationRecord, AdapterError>;

    /// Fetches the applicant's CV status.
    async fn fetch_cv_status(&self, applicant_id: i64) -> Result<CvStatus, AdapterError>;
}

// Re-exports for convenience
pub use ephemeral::EphemeralBackend;
pub use http::HttpApiClient;
pub use mock::MockApiClient;
pub use persistent::PersistentBackend;
pub use tiered::{DisconnectedBackend, RetentionTier, TieredStore};
