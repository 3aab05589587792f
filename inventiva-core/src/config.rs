//! Client configuration.
//!
//! Values resolve in the usual order (highest priority wins): builder calls,
//! environment variables, config file, defaults.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the Inventiva client core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Inventiva REST API
    /// Env: INV_API_BASE_URL
    /// Default: "http://localhost:3005"
    pub base_url: String,

    /// Fixed per-request timeout in seconds (no automatic retry)
    /// Env: INV_REQUEST_TIMEOUT
    /// Default: 10
    pub request_timeout: u64,

    /// Route of the login screen
    /// Env: INV_LOGIN_ROUTE
    /// Default: "/login"
    pub login_route: String,

    /// Route of the dashboard / home screen
    /// Env: INV_HOME_ROUTE
    /// Default: "/"
    pub home_route: String,

    /// Where the persisted session blob lives. None means in-memory only
    /// (the session will not survive a restart)
    /// Env: INV_SESSION_PATH
    /// Default: None
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3005".to_string(),
            request_timeout: 10,
            login_route: "/login".to_string(),
            home_route: "/".to_string(),
            storage_path: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, then `inventiva.toml` if present, then environment.
    pub fn load() -> Result<Self> {
        let mut config = if Path::new("inventiva.toml").exists() {
            Self::from_file("inventiva.toml")?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Apply `INV_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Ok(value) = env::var("INV_API_BASE_URL") {
            self.base_url = value;
        }
        if let Ok(value) = env::var("INV_REQUEST_TIMEOUT") {
            match value.parse() {
                Ok(secs) => self.request_timeout = secs,
                Err(_) => log::warn!("INV_REQUEST_TIMEOUT is not a number, keeping default"),
            }
        }
        if let Ok(value) = env::var("INV_LOGIN_ROUTE") {
            self.login_route = value;
        }
        if let Ok(value) = env::var("INV_HOME_ROUTE") {
            self.home_route = value;
        }
        if let Ok(value) = env::var("INV_SESSION_PATH") {
            self.storage_path = Some(PathBuf::from(value));
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout = seconds;
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_home_route(mut self, route: impl Into<String>) -> Self {
        self.home_route = route.into();
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }
}
