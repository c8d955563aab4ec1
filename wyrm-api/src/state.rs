//! App state: engine handle and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use wyrm_engine::NameService;
use wyrm_registry::MemoryStore;

/// Server configuration, loaded from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Bind address, e.g. `0.0.0.0:3001`.
    pub bind: String,
    /// Optional path of a persistent store file. `None` means in-memory.
    pub store_path: Option<PathBuf>,
}

const DEFAULT_BIND: &str = "0.0.0.0:3001";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            store_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `WYRM_BIND` and `WYRM_STORE_PATH`,
    /// reading a `.env` file first if one is present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            bind: std::env::var("WYRM_BIND").unwrap_or_else(|_| DEFAULT_BIND.into()),
            store_path: std::env::var("WYRM_STORE_PATH").ok().map(PathBuf::from),
        }
    }
}

/// Shared application state: the config and the engine.
pub struct AppState {
    /// The configuration this server was started with.
    pub config: ApiConfig,
    /// The name service engine.
    pub service: NameService,
}

impl AppState {
    /// Creates state with a fresh in-memory store.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            service: NameService::new(Arc::new(MemoryStore::new())),
        }
    }

    /// Creates state over an existing engine (e.g. file-backed).
    pub fn with_service(config: ApiConfig, service: NameService) -> Self {
        Self { config, service }
    }
}
