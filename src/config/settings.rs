//! Application settings.
//!
//! Built-in defaults, then an optional YAML file, then environment
//! variables (a `.env` file is honoured).

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sea_orm::ConnectOptions;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_TTL, DEFAULT_CONN_MAX_LIFETIME, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_IDLE_CONNS, DEFAULT_MAX_OPEN_CONNS, DEFAULT_REFRESH_TOKEN_TTL,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SHUTDOWN_TIMEOUT,
    DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub app: AppConfig,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Storage backend selection
///
/// Names are case-insensitive in both the YAML file and `DB_DRIVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageDriver {
    /// Process-local maps; state is lost on restart
    #[default]
    Memory,
    /// Relational store reached through `database.dsn`
    Postgres,
}

impl FromStr for StorageDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageDriver::Memory),
            "postgres" => Ok(StorageDriver::Postgres),
            other => Err(format!("unknown storage driver {:?}", other)),
        }
    }
}

impl TryFrom<String> for StorageDriver {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for StorageDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageDriver::Memory => write!(f, "memory"),
            StorageDriver::Postgres => write!(f, "postgres"),
        }
    }
}

/// Database settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: StorageDriver,
    pub dsn: String,
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
    #[serde(with = "humantime_serde")]
    pub conn_max_lifetime: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: StorageDriver::default(),
            dsn: String::new(),
            max_open_conns: DEFAULT_MAX_OPEN_CONNS,
            max_idle_conns: DEFAULT_MAX_IDLE_CONNS,
            conn_max_lifetime: default_duration(DEFAULT_CONN_MAX_LIFETIME),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("driver", &self.driver)
            .field("dsn", &"[REDACTED]")
            .field("max_open_conns", &self.max_open_conns)
            .field("max_idle_conns", &self.max_idle_conns)
            .field("conn_max_lifetime", &self.conn_max_lifetime)
            .finish()
    }
}

impl DatabaseConfig {
    /// Pool options for SeaORM.
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.dsn.clone());
        options
            .max_connections(self.max_open_conns)
            .min_connections(self.max_idle_conns.min(self.max_open_conns))
            .max_lifetime(self.conn_max_lifetime)
            .sqlx_logging(false);
        options
    }
}

/// JWT settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    secret: String,
    #[serde(with = "humantime_serde")]
    pub access_token_ttl: Duration,
    #[serde(with = "humantime_serde")]
    pub refresh_token_ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_ttl: default_duration(DEFAULT_ACCESS_TOKEN_TTL),
            refresh_token_ttl: default_duration(DEFAULT_REFRESH_TOKEN_TTL),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

impl JwtConfig {
    /// Whether the insecure development secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_JWT_SECRET
    }
}

/// HTTP server and process settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub version: String,
    pub host: String,
    pub port: u16,
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            shutdown_timeout: default_duration(DEFAULT_SHUTDOWN_TIMEOUT),
            request_timeout: default_duration(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl AppConfig {
    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration: defaults, then `path` if given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Parse YAML; missing sections and keys fall back to defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logger.level = level;
        }
        if let Some(json) = lookup("LOG_JSON") {
            self.logger.json = parse_bool(&json).ok_or_else(|| {
                ConfigError::invalid("LOG_JSON", format!("{:?} is not a boolean", json))
            })?;
        }
        if let Some(driver) = lookup("DB_DRIVER") {
            self.database.driver = driver
                .parse()
                .map_err(|reason: String| ConfigError::invalid("DB_DRIVER", reason))?;
        }
        if let Some(dsn) = lookup("DB_DSN").or_else(|| lookup("DATABASE_URL")) {
            self.database.dsn = dsn;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(host) = lookup("APP_HOST") {
            self.app.host = host;
        }
        if let Some(port) = lookup("APP_PORT") {
            self.app.port = port.parse().map_err(|_| {
                ConfigError::invalid("APP_PORT", format!("{:?} is not a port", port))
            })?;
        }
        if let Some(timeout) = lookup("APP_SHUTDOWN_TIMEOUT") {
            self.app.shutdown_timeout = humantime::parse_duration(&timeout)
                .map_err(|e| ConfigError::invalid("APP_SHUTDOWN_TIMEOUT", e.to_string()))?;
        }
        Ok(())
    }

    /// Check cross-field requirements.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.check_jwt_secret(!cfg!(debug_assertions))?;
        if self.database.max_open_conns == 0 {
            return Err(ConfigError::invalid(
                "database.max_open_conns",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Secret rules: a missing secret becomes the development secret outside
    /// release builds; release builds on postgres require a real one.
    fn check_jwt_secret(&mut self, release: bool) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() && !release {
            self.jwt.secret = DEV_JWT_SECRET.to_string();
        }
        if !release || self.database.driver != StorageDriver::Postgres {
            return Ok(());
        }

        if self.jwt.secret.is_empty() {
            return Err(ConfigError::invalid(
                "jwt.secret",
                "must be set in release builds",
            ));
        }
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::invalid(
                "jwt.secret",
                format!("must be at least {} characters long", MIN_JWT_SECRET_LENGTH),
            ));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Defaults are compile-time literals that parse.
fn default_duration(raw: &str) -> Duration {
    humantime::parse_duration(raw).unwrap_or_default()
}
