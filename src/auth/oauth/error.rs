//! Error types for OAuth 1.0a request signing.
//!
//! # Example
//!
//! ```rust
//! use desk_api::auth::oauth::{parse_authorization_header, SignError};
//!
//! let result = parse_authorization_header("Bearer abc");
//! assert!(matches!(result, Err(SignError::MalformedAuthorizationHeader { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignError {
    /// An existing `Authorization` header could not be parsed into `oauth_*` fields.
    #[error("Malformed OAuth Authorization header: {reason}")]
    MalformedAuthorizationHeader {
        /// What was wrong with the header.
        reason: String,
    },

    /// A required `oauth_*` parameter was absent from the header.
    #[error("OAuth Authorization header is missing '{name}'")]
    MissingParameter {
        /// The missing parameter name.
        name: &'static str,
    },
}
