//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `SKILLSCOPE` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use skillscope::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod assessment;
mod database;
mod error;

pub use ai::AiConfig;
pub use assessment::AssessmentConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Provider configuration (question generation and grading)
    #[serde(default)]
    pub ai: AiConfig,

    /// Database configuration; absent means in-memory persistence
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Assessment engine tuning
    #[serde(default)]
    pub assessment: AssessmentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `SKILLSCOPE` prefix, using `__` to separate nested
    /// values, e.g. `SKILLSCOPE__AI__API_KEY` or
    /// `SKILLSCOPE__DATABASE__URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("SKILLSCOPE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.assessment.validate()?;
        Ok(())
    }
}
