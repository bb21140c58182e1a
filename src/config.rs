use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: default_data_path(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_data_path() -> String {
    "data.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug)]
pub enum ConfigError {
    Read(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads configuration from a YAML file, falling back to defaults when the
/// file does not exist. Missing keys take their defaults individually.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    if raw.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
}
