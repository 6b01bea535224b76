//! Module for the open-position API.
//!
//! This module defines the public interface for browsing the positions
//! applicants may register for.

pub mod handlers;
pub mod routes;
