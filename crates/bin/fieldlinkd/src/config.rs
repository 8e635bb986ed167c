//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `fieldlink.toml` in the working directory (or the path in
//! `FIELDLINK_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use fieldlink_domain::request_log::DEFAULT_CAPACITY;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener settings shared by both services.
    pub server: ServerConfig,
    /// Device pairing service.
    pub pairing: PairingConfig,
    /// Connectivity test harness.
    pub harness: HarnessConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
}

/// Pairing service configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    pub enabled: bool,
    /// TCP port.
    pub port: u16,
    /// Largest accepted request body.
    pub body_limit_bytes: usize,
}

/// Test harness configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub enabled: bool,
    /// TCP port.
    pub port: u16,
    /// Number of requests kept in the log.
    pub capacity: usize,
    /// Dashboard auto-refresh interval.
    pub refresh_seconds: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `fieldlink.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("FIELDLINK_CONFIG").unwrap_or_else(|_| "fieldlink.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("FIELDLINK_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("FIELDLINK_PAIRING_PORT") {
            self.pairing.port = parse_port("FIELDLINK_PAIRING_PORT", &val)?;
        }
        if let Ok(val) = std::env::var("FIELDLINK_HARNESS_PORT") {
            self.harness.port = parse_port("FIELDLINK_HARNESS_PORT", &val)?;
        }
        if let Ok(val) = std::env::var("FIELDLINK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.pairing.enabled && !self.harness.enabled {
            return Err(ConfigError::Validation(
                "at least one of pairing or harness must be enabled".to_string(),
            ));
        }
        if self.pairing.enabled && self.pairing.port == 0 {
            return Err(ConfigError::Validation(
                "pairing port must be non-zero".to_string(),
            ));
        }
        if self.harness.enabled && self.harness.port == 0 {
            return Err(ConfigError::Validation(
                "harness port must be non-zero".to_string(),
            ));
        }
        if self.pairing.enabled && self.harness.enabled && self.pairing.port == self.harness.port
        {
            return Err(ConfigError::Validation(format!(
                "pairing and harness cannot share port {}",
                self.pairing.port
            )));
        }
        if self.harness.capacity == 0 {
            return Err(ConfigError::Validation(
                "harness capacity must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address of the pairing service.
    #[must_use]
    pub fn pairing_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.pairing.port)
    }

    /// Return the `host:port` bind address of the test harness.
    #[must_use]
    pub fn harness_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.harness.port)
    }
}

fn parse_port(var: &str, val: &str) -> Result<u16, ConfigError> {
    val.parse()
        .map_err(|_| ConfigError::Validation(format!("{var} must be a port number, got `{val}`")))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3001,
            body_limit_bytes: 10 * 1024,
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 3000,
            capacity: DEFAULT_CAPACITY,
            refresh_seconds: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fieldlinkd=info,fieldlink=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
