//! Generic data models for the `adapters` crate.
//!
//! These models define common, abstracted representations of portal entities
//! (accounts, positions, registrations, CV status) that can be used by any
//! client implementation, allowing the backend engine to interact with a
//! consistent data format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials for an applicant login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantCredentials {
    pub email: String,
    pub password: String,
}

/// Credentials for an administrator login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Raw login response, before classification.
///
/// An applicant-shaped record may actually encode an administrative account:
/// `user_type` carries a numeric role code when it does. Classification into
/// an applicant or administrator identity happens at the session boundary,
/// never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Numeric role code for administrative accounts; absent for applicants.
    #[serde(default)]
    pub user_type: Option<u8>,
    #[serde(default)]
    pub zonal_office_id: Option<i64>,
    #[serde(default)]
    pub zonal_office_name: Option<String>,
    /// Bearer token issued with the login, when the collaborator returns one.
    #[serde(default)]
    pub token: Option<String>,
}

/// An open position applicants may register for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub zonal_office_id: Option<i64>,
    /// Activation flag; inactive positions are not offered.
    pub active: bool,
    #[serde(default)]
    pub opens_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closes_at: Option<DateTime<Utc>>,
}

/// Filters accepted by the position listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionFilters {
    #[serde(default)]
    pub zonal_office_id: Option<i64>,
    /// Restrict to positions currently open for registration.
    #[serde(default)]
    pub only_active: bool,
}

/// Status of a submitted registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
}

/// An applicant's submitted interest in a position.
///
/// Immutable once created; status transitions are performed by
/// administrators through the collaborator, not through this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub position_id: i64,
    pub applicant_id: i64,
    pub cv_id: i64,
    pub status: RegistrationStatus,
    #[serde(default)]
    pub registration_number: Option<String>,
}

/// Payload for submitting a new registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub position_id: i64,
    pub applicant_id: i64,
    pub cv_id: i64,
}

/// CV completeness snapshot for an applicant.
///
/// An `id` of zero means no CV exists yet; registration requires a non-zero
/// identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CvStatus {
    pub id: i64,
    pub complete: bool,
}
