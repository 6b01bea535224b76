//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the bind address, the collaborator service URL, the durable-store
//! location, and the store key namespace. Everything comes from the
//! environment with sensible defaults; invalid values are logged and
//! replaced rather than aborting startup.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

/// Runtime configuration for the backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP surface binds to.
    pub bind_addr: SocketAddr,
    /// Base URL of the collaborator service (no trailing slash).
    pub api_base_url: String,
    /// Directory holding the long-lived store file; `None` disables
    /// persistence entirely (the store becomes a no-op).
    pub storage_dir: Option<PathBuf>,
    /// Namespace prefix shared by every persisted key.
    pub namespace: String,
}

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_NAMESPACE: &str = "convoca.";

impl Config {
    /// Loads configuration from `CONVOCA_*` environment variables.
    pub fn from_env() -> Self {
        let bind_addr = match env::var("CONVOCA_BIND_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%raw, %err, "invalid CONVOCA_BIND_ADDR, using default");
                default_bind_addr()
            }),
            Err(_) => default_bind_addr(),
        };

        let api_base_url = env::var("CONVOCA_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let storage_dir = env::var("CONVOCA_STORAGE_DIR").ok().map(PathBuf::from);

        let namespace =
            env::var("CONVOCA_STORE_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());

        Self {
            bind_addr,
            api_base_url,
            storage_dir,
            namespace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000)))
}
