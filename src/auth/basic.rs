//! HTTP Basic authentication.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

use crate::config::BasicCredentials;

/// Produces `Basic base64(email:password)` headers.
///
/// The header is computed once at construction since it never changes.
///
/// # Example
///
/// ```rust
/// use desk_api::auth::BasicAuth;
/// use desk_api::BasicCredentials;
///
/// let auth = BasicAuth::new(&BasicCredentials::new("user", "pass").unwrap());
/// assert_eq!(auth.header(), "Basic dXNlcjpwYXNz");
/// ```
#[derive(Clone)]
pub struct BasicAuth {
    email: String,
    header: String,
}

impl BasicAuth {
    /// Creates the strategy from validated credentials.
    #[must_use]
    pub fn new(credentials: &BasicCredentials) -> Self {
        let raw = format!("{}:{}", credentials.email(), credentials.password().as_ref());
        Self {
            email: credentials.email().to_string(),
            header: format!("Basic {}", BASE64_STANDARD.encode(raw)),
        }
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("email", &self.email)
            .field("header", &"Basic *****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encodes_email_and_password() {
        let creds = BasicCredentials::new("agent@example.com", "p@ss:word").unwrap();
        let auth = BasicAuth::new(&creds);
        let encoded = auth.header().strip_prefix("Basic ").unwrap();
        let decoded = BASE64_STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, b"agent@example.com:p@ss:word");
    }

    #[test]
    fn test_debug_masks_header() {
        let auth = BasicAuth::new(&BasicCredentials::new("user", "pass").unwrap());
        let debug = format!("{auth:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("dXNlcjpwYXNz"));
    }
}
