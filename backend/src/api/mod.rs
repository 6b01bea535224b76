//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the portal's API domains,
//! positions and registrations, excluding core session routes which are
//! handled separately.

pub mod position;
pub mod registration;
