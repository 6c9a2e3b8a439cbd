// Runtime configuration read from the environment (and `.env`)

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::infrastructure::completion_client::OPENROUTER_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_STORAGE_PATH: &str = "data/storage.json";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub templates_dir: PathBuf,
    pub storage_path: PathBuf,
    pub completion_endpoint: String,
    /// Origin sent to the completion API as `HTTP-Referer`
    pub app_origin: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR")
            .and_then(|raw| match raw.parse::<SocketAddr>() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Invalid BIND_ADDR, using default");
                    None
                }
            })
            .unwrap_or_else(default_bind_addr);

        let templates_dir = lookup("TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));

        let storage_path = lookup("STORAGE_PATH").map(PathBuf::from).unwrap_or_else(|| {
            tracing::warn!("STORAGE_PATH not set, using default");
            PathBuf::from(DEFAULT_STORAGE_PATH)
        });

        let completion_endpoint =
            lookup("COMPLETION_ENDPOINT").unwrap_or_else(|| OPENROUTER_ENDPOINT.to_string());

        let app_origin = lookup("APP_ORIGIN").filter(|origin| !origin.is_empty());

        Self {
            bind_addr,
            templates_dir,
            storage_path,
            completion_endpoint,
            app_origin,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
