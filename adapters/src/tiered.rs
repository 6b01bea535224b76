//! Two-tier composing adapter over the store backends.
//!
//! The portal persists small auth/session records into one of two retention
//! tiers: a long-lived tier that survives restarts ("remembered") and a
//! session-scoped tier that dies with the process. `TieredStore` composes
//! one backend per tier behind a single facade with read-through fallback,
//! and guarantees that at most one tier holds a given key at a time.

use serde::{Deserialize, Serialize};

use crate::StoreBackend;

/// Retention tier selected at login for all subsequent writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetentionTier {
    /// Long-lived tier; entries survive restarts.
    Remembered,
    /// Session-scoped tier; entries die with the execution context.
    SessionOnly,
}

/// No-op backend for execution contexts without storage.
///
/// Every operation silently does nothing; reads always miss. Used by
/// [`TieredStore::disconnected`] so the engine runs unchanged where no
/// storage is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedBackend;

impl StoreBackend for DisconnectedBackend {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

/// Composing adapter over the two retention tiers.
///
/// All keys are prefixed with a common namespace so the backing stores can
/// be shared with other tools without collisions.
pub struct TieredStore {
    durable: Box<dyn StoreBackend>,
    scoped: Box<dyn StoreBackend>,
    namespace: String,
}

impl TieredStore {
    /// Composes a store from one backend per tier.
    pub fn new(
        durable: Box<dyn StoreBackend>,
        scoped: Box<dyn StoreBackend>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            durable,
            scoped,
            namespace: namespace.into(),
        }
    }

    /// A store whose operations are all no-ops.
    #[must_use]
    pub fn disconnected() -> Self {
        Self::new(
            Box::new(DisconnectedBackend),
            Box::new(DisconnectedBackend),
            "",
        )
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// Reads `key`, checking the long-lived tier first and falling back to
    /// the session tier.
    #[must_use]
    pub fn read(&self, key: &str) -> Option<String> {
        let key = self.namespaced(key);
        self.durable.read(&key).or_else(|| self.scoped.read(&key))
    }

    /// Writes `key` into the tier selected at login and clears any stale
    /// entry the other tier holds for it.
    pub fn write(&self, key: &str, value: &str, tier: RetentionTier) {
        let key = self.namespaced(key);
        match tier {
            RetentionTier::Remembered => {
                self.durable.write(&key, value);
                self.scoped.remove(&key);
            }
            RetentionTier::SessionOnly => {
                self.scoped.write(&key, value);
                self.durable.remove(&key);
            }
        }
    }

    /// Removes `key` from both tiers.
    pub fn remove(&self, key: &str) {
        let key = self.namespaced(key);
        self.durable.remove(&key);
        self.scoped.remove(&key);
    }
}
