//! Error types for the Desk API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use desk_api::{ConfigError, Secret};
//!
//! let result = Secret::new("consumer_secret", "");
//! assert!(matches!(result, Err(ConfigError::EmptyCredential { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A credential component was empty.
    #[error("Credential '{field}' cannot be empty. Please provide the value issued by your Desk site.")]
    EmptyCredential {
        /// The name of the empty credential component.
        field: &'static str,
    },

    /// The site URL is invalid.
    #[error("Invalid site URL '{url}'. Expected an absolute http(s) URL such as 'https://yoursite.desk.com'.")]
    InvalidSiteUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'v<number>' (e.g., 'v2').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// The retry ceiling is invalid.
    #[error("Invalid max retries {value}. Use -1 for unlimited or a non-negative count.")]
    InvalidMaxRetries {
        /// The rejected sentinel value.
        value: i64,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credential_error_message() {
        let error = ConfigError::EmptyCredential {
            field: "consumer_key",
        };
        let message = error.to_string();
        assert!(message.contains("consumer_key"));
        assert!(message.contains("cannot be empty"));
    }

    #[test]
    fn test_invalid_site_url_error_message() {
        let error = ConfigError::InvalidSiteUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("http(s)"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "credentials",
        };
        let message = error.to_string();
        assert!(message.contains("credentials"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_max_retries_mentions_sentinel() {
        let error = ConfigError::InvalidMaxRetries { value: -5 };
        assert!(error.to_string().contains("-1 for unlimited"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingRequiredField { field: "site_url" };
        let _: &dyn std::error::Error = &error;
    }
}
