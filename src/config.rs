//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::generator::value_bounds;
use crate::scheduler::MAX_PERIOD;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub sensor: SensorConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Update pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Tick period in seconds
    #[serde(default = "default_update_interval")]
    pub update_interval_secs: u64,

    /// Number of readings kept in each session's history
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_update_interval() -> u64 {
    1
}

fn default_history_size() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: default_update_interval(),
            history_size: default_history_size(),
        }
    }
}

impl DashboardConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }
}

/// Simulated sensor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    #[serde(default = "default_sensor_min")]
    pub min: f64,

    #[serde(default = "default_sensor_max")]
    pub max: f64,

    /// Decimal places readings are rounded to
    #[serde(default = "default_decimals")]
    pub decimals: u32,

    /// Suffix shown after the current value
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_sensor_min() -> f64 {
    -18.0
}

fn default_sensor_max() -> f64 {
    -16.0
}

fn default_decimals() -> u32 {
    1
}

fn default_unit() -> String {
    "C".to_string()
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            min: default_sensor_min(),
            max: default_sensor_max(),
            decimals: default_decimals(),
            unit: default_unit(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum number of concurrent dashboard sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_sessions() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
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
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("antarctic-explorer").join("config.toml")),
            Some(PathBuf::from("/etc/antarctic-explorer/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Check values that would break the pipeline
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.update_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.update_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.dashboard.update_interval_secs > MAX_PERIOD.as_secs() {
            return Err(ConfigError::Invalid(format!(
                "dashboard.update_interval_secs must be at most {}",
                MAX_PERIOD.as_secs()
            )));
        }
        if self.dashboard.history_size == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.history_size must be at least 1".to_string(),
            ));
        }
        value_bounds(self.sensor.min, self.sensor.max, self.sensor.decimals)
            .map_err(|e| ConfigError::Invalid(format!("sensor: {}", e)))?;
        if self.server.max_sessions == 0 {
            return Err(ConfigError::Invalid(
                "server.max_sessions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Dashboard overrides
        if let Some(secs) = lookup("ANTARCTIC_UPDATE_INTERVAL_SECS").and_then(|s| s.parse().ok()) {
            self.dashboard.update_interval_secs = secs;
        }
        if let Some(size) = lookup("ANTARCTIC_HISTORY_SIZE").and_then(|s| s.parse().ok()) {
            self.dashboard.history_size = size;
        }

        // Server overrides
        if let Some(host) = lookup("ANTARCTIC_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ANTARCTIC_PORT").and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }

        // Logging overrides
        if let Some(level) = lookup("ANTARCTIC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("ANTARCTIC_LOG_FORMAT") {
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Antarctic Explorer Configuration
#
# Environment variables override these settings:
# - ANTARCTIC_UPDATE_INTERVAL_SECS
# - ANTARCTIC_HISTORY_SIZE
# - ANTARCTIC_HOST
# - ANTARCTIC_PORT
# - ANTARCTIC_LOG_LEVEL
# - ANTARCTIC_LOG_FORMAT

[dashboard]
# Seconds between readings
update_interval_secs = 1

# Readings kept in the rolling history
history_size = 5

[sensor]
# Inclusive range of simulated temperatures
min = -18.0
max = -16.0

# Decimal places readings are rounded to
decimals = 1

# Unit shown after the current value
unit = "C"

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8000

# Maximum concurrent dashboard sessions
max_sessions = 1000

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
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dashboard.update_interval_secs, 1);
        assert_eq!(config.dashboard.history_size, 5);
        assert_eq!(config.dashboard.update_interval(), Duration::from_secs(1));
        assert_eq!(config.sensor.min, -18.0);
        assert_eq!(config.sensor.max, -16.0);
        assert_eq!(config.sensor.decimals, 1);
        assert_eq!(config.server.addr(), "0.0.0.0:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generated_default_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.dashboard.history_size, 5);
        assert_eq!(config.sensor.unit, "C");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("[dashboard]\nhistory_size = 10\n").unwrap();
        assert_eq!(config.dashboard.history_size, 10);
        assert_eq!(config.dashboard.update_interval_secs, 1);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9001\n[sensor]\nunit = \"°C\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.sensor.unit, "°C");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/antarctic.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard\nhistory_size = ").unwrap();

        match Config::load(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Config::parse("[dashboard]\nupdate_interval_secs = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[dashboard]\nhistory_size = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[sensor]\nmin = -10.0\nmax = -20.0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_decimals_upper_bound() {
        assert!(Config::parse("[sensor]\ndecimals = 15\n").is_ok());
        assert!(matches!(
            Config::parse("[sensor]\ndecimals = 16\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[sensor]\ndecimals = 400\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_range_without_grid_value_rejected() {
        assert!(matches!(
            Config::parse("[sensor]\nmin = -17.04\nmax = -17.01\ndecimals = 1\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(Config::parse("[sensor]\nmin = -17.95\nmax = -16.05\n").is_ok());
    }

    #[test]
    fn test_update_interval_upper_bound() {
        assert!(Config::parse("[dashboard]\nupdate_interval_secs = 86400\n").is_ok());
        assert!(matches!(
            Config::parse("[dashboard]\nupdate_interval_secs = 86401\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::parse("[dashboard]\nupdate_interval_secs = 9223372036854775807\n"),
            Err(ConfigError::Invalid(_))
        ));

        // The same limit applies to environment overrides
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "ANTARCTIC_UPDATE_INTERVAL_SECS").then(|| "9223372036854775807".to_string())
        });
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ANTARCTIC_UPDATE_INTERVAL_SECS", "2"),
            ("ANTARCTIC_HISTORY_SIZE", "8"),
            ("ANTARCTIC_PORT", "not-a-port"),
            ("ANTARCTIC_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.dashboard.update_interval_secs, 2);
        assert_eq!(config.dashboard.history_size, 8);
        // Unparseable values are ignored
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
