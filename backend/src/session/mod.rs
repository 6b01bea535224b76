//! Session module for managing identities, retention tiers, and access.
//!
//! This module provides the public interface for session-related
//! functionality such as login, logout, rehydration, route reconciliation
//! entry points, and the middleware protecting applicant-only routes.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::SessionError;
pub use models::{
    AdminRole, AdminSection, AdministratorIdentity, ApplicantIdentity, ApplicantSection, AuthView,
    NavigationState, PortalKind, SessionIdentity,
};
pub use service::SessionService;
