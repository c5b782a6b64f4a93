//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::csv_codec::{NameCommaPolicy, DEFAULT_EXPORT_FILENAME};
use crate::projection::Projection;
use crate::session::SessionOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub csv: CsvConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the objective list is stored
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("compass").to_string_lossy().to_string())
        .unwrap_or_else(|| "./compass_data".to_string())
}

fn default_file_name() -> String {
    "objectives.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

impl StorageConfig {
    /// Full path of the objective file
    pub fn file_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8091".to_string(),
                "http://127.0.0.1:8091".to_string(),
            ],
            max_body_size: default_max_body_size(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chart settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartConfig {
    /// Formula for the Combined chart: "blended" or "product"
    #[serde(default)]
    pub projection: Projection,
}

/// CSV import/export settings
#[derive(Debug, Clone, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    /// "strip" removes commas from names on export, "quote" keeps them
    #[serde(default)]
    pub name_commas: NameCommaPolicy,
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            export_filename: default_export_filename(),
            name_commas: NameCommaPolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn filter_directive(&self) -> String {
        format!("compass={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("compass").join("config.toml")),
            Some(PathBuf::from("/etc/compass/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Session behaviour derived from this configuration
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            projection: self.chart.projection,
            name_commas: self.csv.name_commas,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("COMPASS_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = var("COMPASS_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("COMPASS_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(projection) = var("COMPASS_PROJECTION") {
            match projection.parse() {
                Ok(p) => self.chart.projection = p,
                Err(e) => tracing::warn!("Ignoring COMPASS_PROJECTION: {}", e),
            }
        }

        if let Some(level) = var("COMPASS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("COMPASS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Compass Configuration
#
# Environment variables override these settings:
# - COMPASS_DATA_DIR
# - COMPASS_API_HOST
# - COMPASS_API_PORT
# - COMPASS_PROJECTION
# - COMPASS_LOG_LEVEL
# - COMPASS_LOG_FORMAT

[storage]
# Directory holding the objective list
data_dir = "~/.local/share/compass"

# File name of the objective list (a JSON array)
file_name = "objectives.json"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:8091", "http://127.0.0.1:8091"]

# Maximum request body size in bytes (CSV uploads)
max_body_size = 2097152

[chart]
# Combined chart formula: "blended" = (hypot(a, b) / sqrt(2) + a * b) / 2,
# "product" = a * b
projection = "blended"

[csv]
# File name offered for CSV downloads
export_filename = "objectives.csv"

# Commas in objective names on export: "strip" (lossy) or "quote"
name_commas = "strip"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();

        assert_eq!(config.api.port, 8090);
        assert_eq!(config.chart.projection, Projection::Blended);
        assert_eq!(config.csv.name_commas, NameCommaPolicy::Strip);
        assert_eq!(config.csv.export_filename, "objectives.csv");
        assert_eq!(config.storage.file_name, "objectives.json");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[chart]\nprojection = \"product\"\n").unwrap();

        assert_eq!(config.chart.projection, Projection::Product);
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_projection_rejected() {
        assert!(Config::parse("[chart]\nprojection = \"cubic\"\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("COMPASS_DATA_DIR", "/tmp/compass"),
            ("COMPASS_API_PORT", "9000"),
            ("COMPASS_PROJECTION", "product"),
            ("COMPASS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.file_path(), PathBuf::from("/tmp/compass/objectives.json"));
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.session_options().projection, Projection::Product);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
