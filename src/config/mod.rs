//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/roam-point/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Boundary dataset settings
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Imagery oracle settings
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Boundary dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory holding the GeoJSON files; empty means the XDG data dir
    #[serde(default)]
    pub data_dir: String,

    /// Download missing dataset files on startup
    #[serde(default = "default_auto_fetch")]
    pub auto_fetch: bool,
}

/// Imagery oracle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Google Maps API key
    #[serde(default)]
    pub api_key: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u64,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_auto_fetch() -> bool {
    DEFAULT_AUTO_FETCH
}
fn default_oracle_timeout() -> u64 {
    DEFAULT_ORACLE_TIMEOUT_SECS
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            auto_fetch: default_auto_fetch(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific path (for testing)
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// The server bind address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the dataset directory, defaulting to the XDG data dir
    pub fn dataset_dir(&self) -> Result<PathBuf> {
        if !self.dataset.data_dir.is_empty() {
            return Ok(PathBuf::from(&self.dataset.data_dir));
        }
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME).join(DATASET_SUBDIR))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["dataset", "data_dir"] => Some(self.dataset.data_dir.clone()),
            ["dataset", "auto_fetch"] => Some(self.dataset.auto_fetch.to_string()),

            ["oracle", "api_key"] => Some(self.oracle.api_key.clone()),
            ["oracle", "timeout_secs"] => Some(self.oracle.timeout_secs.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["dataset", "data_dir"] => {
                self.dataset.data_dir = value.to_string();
            }
            ["dataset", "auto_fetch"] => {
                self.dataset.auto_fetch = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid auto_fetch value: {}", value)))?;
            }
            ["oracle", "api_key"] => {
                self.oracle.api_key = value.to_string();
            }
            ["oracle", "timeout_secs"] => {
                self.oracle.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }
            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// All settable key paths
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "dataset.data_dir",
            "dataset.auto_fetch",
            "oracle.api_key",
            "oracle.timeout_secs",
            "server.host",
            "server.port",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.dataset.auto_fetch);
        assert!(config.oracle.api_key.is_empty());
    }

    #[test]
    fn test_load_partial_config_applies_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[oracle]\napi_key = \"secret\"").unwrap();

        let config = Config::load_from(file.path().to_path_buf()).unwrap();
        assert_eq!(config.oracle.api_key, "secret");
        assert_eq!(config.oracle.timeout_secs, DEFAULT_ORACLE_TIMEOUT_SECS);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_invalid_config_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        assert!(Config::load_from(file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut config = Config::default();

        config.set("server.port", "9999").unwrap();
        assert_eq!(config.get("server.port").as_deref(), Some("9999"));

        config.set("oracle.api_key", "abc").unwrap();
        assert_eq!(config.get("oracle.api_key").as_deref(), Some("abc"));

        assert!(config.set("server.port", "not-a-port").is_err());
        assert!(config.set("nope.nothing", "x").is_err());
        assert!(config.get("nope.nothing").is_none());
    }

    #[test]
    fn test_explicit_dataset_dir() {
        let mut config = Config::default();
        config.dataset.data_dir = "/tmp/boundaries".to_string();
        assert_eq!(
            config.dataset_dir().unwrap(),
            PathBuf::from("/tmp/boundaries")
        );
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT));
    }
}
