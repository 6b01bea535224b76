//! One-shot notification bridge.
//!
//! Carries a single ephemeral message across a forced full navigation (for
//! example "your session expired, sign in again"). The notice rides the
//! session-scoped tier, is read and deleted exactly once, and is only ever
//! written while an authenticated session exists — a first-time anonymous
//! visitor must never see someone else's expiry toast.

use adapters::{RetentionTier, TieredStore};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::session::models::SessionIdentity;

/// Store key for the pending notice (namespaced by the store).
const NOTICE_KEY: &str = "notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A message surfaced once on the next load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientNotice {
    pub kind: NoticeKind,
    pub message: String,
}

impl TransientNotice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }
}

/// Stashes `notice` for the next load.
///
/// Refused (silently) unless `identity` is authenticated: the bridge exists
/// to explain what happened to a session, so without one there is nothing
/// to explain.
pub fn stash(store: &TieredStore, identity: &SessionIdentity, notice: &TransientNotice) {
    if !identity.is_authenticated() {
        return;
    }
    match serde_json::to_string(notice) {
        Ok(raw) => store.write(NOTICE_KEY, &raw, RetentionTier::SessionOnly),
        Err(err) => warn!(%err, "could not encode transient notice"),
    }
}

/// Takes the pending notice, if any, deleting it in the same call.
pub fn take(store: &TieredStore) -> Option<TransientNotice> {
    let raw = store.read(NOTICE_KEY)?;
    store.remove(NOTICE_KEY);
    match serde_json::from_str(&raw) {
        Ok(notice) => Some(notice),
        Err(err) => {
            warn!(%err, "discarding malformed transient notice");
            None
        }
    }
}
