//! In-memory session-scoped tier of the durable store.
//!
//! Values written here live exactly as long as the process; a fresh
//! execution context starts empty. This is the backing tier for sessions
//! the user chose not to be remembered across restarts.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::StoreBackend;

/// Session-scoped key-value tier.
#[derive(Debug, Default)]
pub struct EphemeralBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl EphemeralBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoreBackend for EphemeralBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}
