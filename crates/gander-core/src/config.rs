//! Configuration management
//!
//! Loads `<config_dir>/gander/config.toml` with defaults for anything unset.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::FormatterOptions;
use crate::reveal::RevealPacing;

/// Overrides `backend.url` when set
pub const BACKEND_URL_ENV: &str = "GANDER_BACKEND_URL";

/// Chat proxy endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the proxy, without the route
    pub url: String,
    /// Model name forwarded to the proxy
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3008".to_string(),
            model: "gemini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reveal pacing in config-friendly units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub base_delay_ms: u64,
    pub increment_us: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 10,
            increment_us: 10,
        }
    }
}

impl RevealConfig {
    pub fn pacing(&self) -> RevealPacing {
        RevealPacing::new(
            Duration::from_millis(self.base_delay_ms),
            Duration::from_micros(self.increment_us),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub reveal: RevealConfig,
    pub formatter: FormatterOptions,
}

impl Config {
    /// Default config location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gander").join("config.toml"))
    }

    /// Load from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from a specific path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend.url = url.trim().to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.reveal.pacing(), RevealPacing::default());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[backend]\nurl = \"http://proxy:9000\"\n\n[reveal]\nbase_delay_ms = 25\n\n[formatter]\nbold_color = \"yellow\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend.url, "http://proxy:9000");
        assert_eq!(config.backend.model, "gemini");
        assert_eq!(config.reveal.base_delay_ms, 25);
        assert_eq!(config.reveal.increment_us, 10);
        assert_eq!(config.formatter.bold_color, "yellow");
        assert_eq!(config.formatter.bullet_color, "#3b82f6");
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[reveal]\nbase_delay_ms = \"slow\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
