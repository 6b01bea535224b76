//! Module for core business logic services.
//!
//! This module encapsulates the services that sit above the session state:
//! the route reconciler, the role gate, the admission controller, and the
//! one-shot notification bridge.

pub mod admission;
pub mod notices;
pub mod reconciler;
pub mod role_gate;
