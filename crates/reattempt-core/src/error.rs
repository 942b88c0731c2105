//! Error types for reattempt-core
//!
//! These cover configuration handling. Failures of retried work are reported
//! through [`crate::retry::RetryError`] instead.

use thiserror::Error;

/// Result type alias using reattempt-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for reattempt
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration values
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_display() {
        let err = Error::config_not_found("/tmp/reattempt.yaml");
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /tmp/reattempt.yaml"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::invalid_config("base-delay must not be negative");
        assert!(err.to_string().contains("base-delay must not be negative"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
