//! Module for the registration API.
//!
//! This module handles the applicant-facing registration flow: listing an
//! applicant's registrations, the admission pre-check, and submission.

pub mod handlers;
pub mod routes;
