//! # Configuration
//!
//! Settings are read from three layers, later layers winning:
//!
//! 1. `rexq.toml` (or the file given with `--config`)
//! 2. Environment: `REXQ_URL`, `REXQ_GRAPH`, `REXQ_API_KEY`
//! 3. Command-line flags (`--url`, `--graph`)
//!
//! ```toml
//! url = "http://localhost:8182"
//! graph = "tinkergraph"
//! timeout_ms = 5000
//! default_limit = 100
//!
//! [auth]
//! username = "admin"
//! password = "secret"
//! ```

use rexq_core::Auth;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Server URL used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:8182";

/// Graph name used when nothing else is configured.
pub const DEFAULT_GRAPH: &str = "graph";

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "rexq.toml";

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("[auth] username is set but password is missing")]
    IncompleteCredentials,
}

// =============================================================================
// FILE LAYER
// =============================================================================

/// Contents of `rexq.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub graph: Option<String>,
    pub timeout_ms: Option<u64>,
    pub default_limit: Option<u64>,
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FileConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read `path`. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml(&text, &path)
    }
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================

/// Flag values that override file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub url: Option<String>,
    pub graph: Option<String>,
}

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub graph: String,
    pub timeout: Option<Duration>,
    pub default_limit: Option<u64>,
    pub auth: Option<Auth>,
}

impl Config {
    /// Load from disk and the process environment.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = FileConfig::load(path)?;
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge the three layers. `env` looks up one environment variable.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let url = overrides
            .url
            .or_else(|| env("REXQ_URL"))
            .or(file.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let graph = overrides
            .graph
            .or_else(|| env("REXQ_GRAPH"))
            .or(file.graph)
            .unwrap_or_else(|| DEFAULT_GRAPH.to_string());

        let file_auth = file.auth.unwrap_or_default();
        let api_key = env("REXQ_API_KEY").or(file_auth.api_key);
        let auth = match (api_key, file_auth.username, file_auth.password) {
            (Some(key), username, _) => {
                if username.is_some() {
                    tracing::warn!(
                        "Both an API key and a username are configured; using the API key"
                    );
                }
                Some(Auth::Bearer(key))
            }
            (None, Some(username), Some(password)) => Some(Auth::Basic { username, password }),
            (None, Some(_), None) => return Err(ConfigError::IncompleteCredentials),
            (None, None, _) => None,
        };

        Ok(Self {
            url,
            graph,
            timeout: file.timeout_ms.map(Duration::from_millis),
            default_limit: file.default_limit,
            auth,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
