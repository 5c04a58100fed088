//! Configuration
//!
//! Optional TOML file plus `ALLY_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "ally.toml";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/analyze-image";
pub const DEFAULT_STORE: &str = "ally-store.json";

pub const ENDPOINT_VAR: &str = "ALLY_ENDPOINT";
pub const STORE_VAR: &str = "ALLY_STORE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyConfig {
    /// Image description endpoint
    pub endpoint: String,
    /// Preference store file
    pub store: PathBuf,
    /// Request timeout for image descriptions
    pub timeout_secs: u64,
}

impl Default for AllyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            store: PathBuf::from(DEFAULT_STORE),
            timeout_secs: 30,
        }
    }
}

impl AllyConfig {
    /// Load from `path`, or from `ally.toml` if it exists, then apply the
    /// process environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml(&content).with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from environment variables; empty values are ignored
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(store) = lookup(STORE_VAR).filter(|v| !v.trim().is_empty()) {
            self.store = PathBuf::from(store);
        }
    }
}
