//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// A non-empty secret value (consumer secret, token secret or password).
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `Secret(*****)` instead of the actual value.
///
/// # Example
///
/// ```rust
/// use desk_api::Secret;
///
/// let secret = Secret::new("consumer_secret", "s3cr3t").unwrap();
/// assert_eq!(secret.as_ref(), "s3cr3t");
/// assert_eq!(format!("{:?}", secret), "Secret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a new validated secret.
    ///
    /// `field` names the credential component in the error message.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the value is empty.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ConfigError::EmptyCredential { field });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Secret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

/// A validated Desk site URL (e.g. `https://yoursite.desk.com`).
///
/// Only absolute `http` and `https` URLs with a host are accepted. A path is
/// kept as a prefix for the API base (`{site}/api/{version}/`); query and
/// fragment are discarded.
///
/// # Example
///
/// ```rust
/// use desk_api::SiteUrl;
///
/// let site = SiteUrl::new("https://example.desk.com/").unwrap();
/// assert_eq!(site.as_ref(), "https://example.desk.com");
///
/// let proxied = SiteUrl::new("https://gateway.example.com/desk").unwrap();
/// assert_eq!(proxied.url().path(), "/desk/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: Url,
    display: String,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSiteUrl`] if the URL cannot be parsed,
    /// is not http(s), or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let invalid = || ConfigError::InvalidSiteUrl { url: raw.clone() };

        let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }

        let path = format!("{}/", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        let display = url.as_str().trim_end_matches('/').to_string();
        Ok(Self { url, display })
    }

    /// Returns the parsed URL. Its path always ends with `/`.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_rejects_empty() {
        assert!(matches!(
            Secret::new("token_secret", ""),
            Err(ConfigError::EmptyCredential {
                field: "token_secret"
            })
        ));
    }

    #[test]
    fn test_secret_debug_is_masked() {
        let secret = Secret::new("password", "hunter2").unwrap();
        let debug = format!("{secret:?}");
        assert_eq!(debug, "Secret(*****)");
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_site_url_strips_query_and_trailing_slash() {
        let site = SiteUrl::new("https://example.desk.com/?x=1#frag").unwrap();
        assert_eq!(site.as_ref(), "https://example.desk.com");
        assert_eq!(site.url().path(), "/");
        assert!(site.url().query().is_none());
        assert!(site.url().fragment().is_none());
    }

    #[test]
    fn test_site_url_keeps_path_prefix() {
        let site = SiteUrl::new("https://gateway.example.com/support/desk/").unwrap();
        assert_eq!(site.as_ref(), "https://gateway.example.com/support/desk");
        assert_eq!(site.url().path(), "/support/desk/");
    }

    #[test]
    fn test_site_url_keeps_port() {
        let site = SiteUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(site.as_ref(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_site_url_rejects_relative_and_non_http() {
        assert!(SiteUrl::new("example.desk.com").is_err());
        assert!(SiteUrl::new("ftp://example.desk.com").is_err());
        assert!(SiteUrl::new("").is_err());
    }
}
