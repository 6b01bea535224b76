//! File-backed long-lived tier of the durable store.
//!
//! Entries are kept as a single JSON object on disk and survive process
//! restarts. The file is read once at construction; every mutation rewrites
//! it. Records here are a handful of short strings, so whole-file rewrites
//! stay cheap.
//!
//! I/O failures are logged and swallowed: a broken disk degrades the portal
//! to session-only retention, it must never take the engine down.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::warn;

use crate::StoreBackend;

/// Long-lived key-value tier persisted to a JSON file.
pub struct PersistentBackend {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl PersistentBackend {
    /// Opens (or initializes) the tier at `path`.
    ///
    /// A missing file starts the tier empty; an unreadable or corrupt file
    /// is treated the same way, with a warning.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "discarding corrupt store file");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(path = %path.display(), %err, "store file unreadable, starting empty");
                HashMap::new()
            }
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Serializes the current map back to disk, swallowing failures.
    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "could not encode store contents");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), %err, "could not create store directory");
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), %err, "could not persist store contents");
        }
    }
}

impl StoreBackend for PersistentBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}
