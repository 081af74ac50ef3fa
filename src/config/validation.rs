//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use tracing_subscriber::EnvFilter;

use super::Settings;
use crate::utils::errors::{KahootStoreError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(KahootStoreError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(KahootStoreError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(KahootStoreError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(KahootStoreError::Config(
            "Acquire timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(KahootStoreError::Config("Log level is required".to_string()));
    }

    // Same parser as init_logging, so per-target directives are accepted
    if let Err(e) = EnvFilter::try_new(&config.level) {
        return Err(KahootStoreError::Config(format!(
            "Invalid log level: {}: {}",
            config.level, e
        )));
    }

    if matches!(&config.directory, Some(dir) if dir.trim().is_empty()) {
        return Err(KahootStoreError::Config(
            "Log directory must not be blank when set".to_string(),
        ));
    }

    Ok(())
}
