//! Configuration loading and validation for Periscan.
//!
//! Loads configuration from `~/.periscan/config.toml` with the
//! `GEMINI_API_KEY` environment variable taking precedence over the file.
//! A missing file yields defaults; a malformed file is an error.

use periscan_core::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The root configuration structure.
///
/// Maps directly to `~/.periscan/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the remote model endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model to query
    #[serde(default = "default_model")]
    pub model: String,

    /// Network sweep settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Observation log capacities
    #[serde(default)]
    pub logs: LogConfig,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("scan", &self.scan)
            .field("logs", &self.logs)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            scan: ScanConfig::default(),
            logs: LogConfig::default(),
        }
    }
}

/// Network sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Ports probed on each candidate host
    #[serde(default = "default_ports")]
    pub ports: Vec<u16>,

    /// Per-attempt connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Highest host id swept (1..=max_host_id)
    #[serde(default = "default_max_host_id")]
    pub max_host_id: u8,
}

fn default_ports() -> Vec<u16> {
    vec![20, 22, 80]
}
fn default_connect_timeout_ms() -> u64 {
    200
}
fn default_max_host_id() -> u8 {
    255
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: default_ports(),
            connect_timeout_ms: default_connect_timeout_ms(),
            max_host_id: default_max_host_id(),
        }
    }
}

/// Observation log capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_dialogue_capacity")]
    pub dialogue_capacity: usize,

    #[serde(default = "default_host_capacity")]
    pub host_capacity: usize,

    #[serde(default = "default_device_capacity")]
    pub device_capacity: usize,
}

fn default_dialogue_capacity() -> usize {
    16
}
fn default_host_capacity() -> usize {
    24
}
fn default_device_capacity() -> usize {
    256
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dialogue_capacity: default_dialogue_capacity(),
            host_capacity: default_host_capacity(),
            device_capacity: default_device_capacity(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

impl AppConfig {
    /// Default config file location: `~/.periscan/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs_home().join(".periscan").join("config.toml")
    }

    /// Load from the default path with environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// The API key, or a `ConfigError` naming both ways to provide one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_device_capacities() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.scan.ports, vec![20, 22, 80]);
        assert_eq!(config.scan.connect_timeout_ms, 200);
        assert_eq!(config.logs.dialogue_capacity, 16);
        assert_eq!(config.logs.host_capacity, 24);
        assert_eq!(config.logs.device_capacity, 256);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/periscan.toml")).unwrap();
        assert_eq!(config.logs.host_capacity, 24);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"test-key\"\n\n[scan]\nconnect_timeout_ms = 50").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.scan.connect_timeout_ms, 50);
        assert_eq!(config.scan.ports, vec![20, 22, 80]);
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("super-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_path_lives_under_home() {
        let path = AppConfig::default_path();
        assert!(path.ends_with(".periscan/config.toml"));
        assert!(path.starts_with(dirs_home()));
    }

    #[test]
    fn require_api_key_rejects_empty() {
        let mut config = AppConfig::default();
        assert!(config.require_api_key().is_err());
        config.api_key = Some(String::new());
        assert!(config.require_api_key().is_err());
        config.api_key = Some("k".into());
        assert_eq!(config.require_api_key().unwrap(), "k");
    }
}
