//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `KAHOOT_DATABASE__MAX_CONNECTIONS`
pub const ENV_PREFIX: &str = "KAHOOT";

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub idle_timeout_seconds: Option<u64>,
    pub max_lifetime_seconds: Option<u64>,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_seconds.map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_seconds.map(Duration::from_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://postgres@localhost:5432/kahoot".to_string(),
            max_connections: 12,
            min_connections: 1,
            acquire_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus environment variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path.as_ref()).required(true))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        if let Ok(url) = std::env::var("DATABASE_URL") {
            settings.database.url = url;
        }
        Ok(settings)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::KahootStoreError> {
        super::validation::validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_deployed_pool_bounds() {
        let settings = Settings::default();
        assert_eq!(settings.database.min_connections, 1);
        assert_eq!(settings.database.max_connections, 12);
        assert_eq!(settings.database.acquire_timeout(), Duration::from_secs(30));
        assert_eq!(settings.logging.level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            r#"
[database]
url = "postgresql://quiz:secret@db:5432/quiz"
max_connections = 4
min_connections = 2
acquire_timeout_seconds = 5

[logging]
level = "debug"
json = true
"#
        )
        .expect("write config");

        let settings = Settings::from_file(file.path()).expect("settings load");
        assert_eq!(settings.database.max_connections, 4);
        assert_eq!(settings.database.min_connections, 2);
        assert_eq!(settings.database.acquire_timeout_seconds, 5);
        // untouched keys keep their defaults
        assert_eq!(settings.database.idle_timeout_seconds, Some(600));
        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.json);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::from_file("/definitely/not/here/kahoot.toml").is_err());
    }
}
