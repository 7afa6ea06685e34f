//! Application configuration module
//!
//! Handles the YAML config file, environment overrides and
//! application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::{
    AppConfig, Config, ConfigError, DatabaseConfig, JwtConfig, LoggerConfig, StorageDriver,
};
