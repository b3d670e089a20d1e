//! API configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Backing store for claims and service requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    /// Process-local maps; contents are lost on restart
    #[default]
    Memory,
    /// JSONB documents in PostgreSQL at `database_url`
    Postgres,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    #[validate(length(min = 1, message = "host must not be empty"))]
    pub host: String,
    /// Server port
    #[validate(range(min = 1, message = "port must be at least 1"))]
    pub port: u16,
    /// JWT secret for authentication
    #[validate(length(min = 16, message = "jwt_secret must be at least 16 characters"))]
    pub jwt_secret: String,
    /// JWT expiration in seconds, at most 30 days
    #[validate(range(min = 1, max = 2592000, message = "jwt_expiration_secs must be between 1 and 2592000"))]
    pub jwt_expiration_secs: u64,
    /// Database URL, used when `storage` is `postgres`
    pub database_url: String,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: Storage,
    /// Request body ceiling; must admit an upload at the 5 MiB limit
    #[validate(range(min = 5242880, message = "max_body_bytes must be at least the upload limit"))]
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/vendor_portal".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            storage: Storage::Memory,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset keys keep their defaults. The result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: ApiConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_validation::MAX_UPLOAD_BYTES;

    #[test]
    fn test_defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage, Storage::Memory);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let config = ApiConfig {
            jwt_secret: "short".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("jwt_secret"));
    }

    #[test]
    fn test_body_limit_must_admit_max_upload() {
        let at_limit = ApiConfig {
            max_body_bytes: MAX_UPLOAD_BYTES as usize,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let below = ApiConfig {
            max_body_bytes: MAX_UPLOAD_BYTES as usize - 1,
            ..Default::default()
        };
        assert!(below.validate().is_err());
    }

    #[test]
    fn test_jwt_expiration_is_bounded() {
        let thirty_days = ApiConfig {
            jwt_expiration_secs: 30 * 24 * 60 * 60,
            ..Default::default()
        };
        assert!(thirty_days.validate().is_ok());

        let too_long = ApiConfig {
            jwt_expiration_secs: 30 * 24 * 60 * 60 + 1,
            ..Default::default()
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("jwt_expiration_secs"));
    }

    #[test]
    fn test_storage_names() {
        let storage: Storage = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(storage, Storage::Postgres);
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
