//! Configuration types for the Desk API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with a Desk site.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DeskConfig`]: The main configuration struct holding all client settings
//! - [`DeskConfigBuilder`]: A builder for constructing [`DeskConfig`] instances
//! - [`Credentials`]: The active authentication mode (OAuth 1.0a or Basic)
//! - [`SiteUrl`]: A validated site URL
//! - [`Secret`]: A non-empty secret with masked debug output
//! - [`ApiVersion`]: The API version path segment
//! - [`RetryBudget`]: How often throttled requests are resent
//!
//! # Example
//!
//! ```rust
//! use desk_api::{DeskConfig, OAuthCredentials, RetryBudget, SiteUrl};
//!
//! let config = DeskConfig::builder()
//!     .site_url(SiteUrl::new("https://example.desk.com").unwrap())
//!     .oauth(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap())
//!     .max_retries(RetryBudget::Limited(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base().as_str(), "https://example.desk.com/api/v2/");
//! ```

mod newtypes;
mod retry;
mod version;

pub use newtypes::{Secret, SiteUrl};
pub use retry::RetryBudget;
pub use version::ApiVersion;

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// OAuth 1.0a consumer and access-token credentials.
///
/// # Example
///
/// ```rust
/// use desk_api::OAuthCredentials;
///
/// let creds = OAuthCredentials::new("consumer-key", "consumer-secret", "token", "token-secret").unwrap();
/// assert_eq!(creds.consumer_key(), "consumer-key");
/// assert!(!format!("{creds:?}").contains("consumer-secret"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthCredentials {
    consumer_key: String,
    consumer_secret: Secret,
    token_key: String,
    token_secret: Secret,
}

impl OAuthCredentials {
    /// Creates a validated OAuth credential set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if any component is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_key: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let consumer_key = non_empty("consumer_key", consumer_key.into())?;
        let consumer_secret = Secret::new("consumer_secret", consumer_secret)?;
        let token_key = non_empty("token_key", token_key.into())?;
        let token_secret = Secret::new("token_secret", token_secret)?;
        Ok(Self {
            consumer_key,
            consumer_secret,
            token_key,
            token_secret,
        })
    }

    /// Returns the consumer key.
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> &Secret {
        &self.consumer_secret
    }

    /// Returns the access token key.
    #[must_use]
    pub fn token_key(&self) -> &str {
        &self.token_key
    }

    /// Returns the access token secret.
    #[must_use]
    pub const fn token_secret(&self) -> &Secret {
        &self.token_secret
    }
}

/// HTTP Basic credentials (agent email and password).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    email: String,
    password: Secret,
}

impl BasicCredentials {
    /// Creates validated Basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if either component is empty.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            email: non_empty("email", email.into())?,
            password: Secret::new("password", password)?,
        })
    }

    /// Returns the user email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub const fn password(&self) -> &Secret {
        &self.password
    }
}

/// The authentication mode of a client.
///
/// A client is always in exactly one mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Requests are signed with OAuth 1.0a (HMAC-SHA1).
    OAuth(OAuthCredentials),
    /// Requests carry an HTTP Basic `Authorization` header.
    Basic(BasicCredentials),
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyCredential { field });
    }
    Ok(value)
}

/// Configuration for the Desk API client.
///
/// # Thread Safety
///
/// `DeskConfig` is `Clone`, `Send`, and `Sync`. It is read-only after
/// [`DeskConfigBuilder::build`], so clients share it without locking.
#[derive(Clone, Debug)]
pub struct DeskConfig {
    site_url: SiteUrl,
    api_version: ApiVersion,
    credentials: Credentials,
    max_retries: RetryBudget,
    request_deadline: Option<Duration>,
    log_payloads: bool,
    user_agent_prefix: Option<String>,
}

impl DeskConfig {
    /// Creates a new builder for constructing a `DeskConfig`.
    #[must_use]
    pub fn builder() -> DeskConfigBuilder {
        DeskConfigBuilder::new()
    }

    /// Returns the site URL.
    #[must_use]
    pub const fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the active credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the retry budget for throttled requests.
    #[must_use]
    pub const fn max_retries(&self) -> RetryBudget {
        self.max_retries
    }

    /// Returns the per-call deadline, if configured.
    ///
    /// The deadline covers every attempt and every rate-limit sleep of one call.
    #[must_use]
    pub const fn request_deadline(&self) -> Option<Duration> {
        self.request_deadline
    }

    /// Returns whether request and response bodies are mirrored to the
    /// `desk_api::wire` tracing target.
    #[must_use]
    pub const fn log_payloads(&self) -> bool {
        self.log_payloads
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the API base URL, `{site}/api/{version}/`.
    ///
    /// A path on the site URL is kept in front of `/api`.
    #[must_use]
    pub fn api_base(&self) -> Url {
        let mut url = self.site_url.url().clone();
        let path = format!("{}api/{}/", url.path(), self.api_version);
        url.set_path(&path);
        url
    }
}

// Verify DeskConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeskConfig>();
};

/// Builder for constructing [`DeskConfig`] instances.
///
/// Required fields are `site_url` and one of `oauth` / `basic_auth`. Setting
/// one authentication mode replaces the other.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest`]
/// - `max_retries`: [`RetryBudget::Unlimited`]
/// - `request_deadline`: `None`
/// - `log_payloads`: `true`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct DeskConfigBuilder {
    site_url: Option<SiteUrl>,
    api_version: Option<ApiVersion>,
    credentials: Option<Credentials>,
    max_retries: Option<RetryBudget>,
    request_deadline: Option<Duration>,
    log_payloads: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl DeskConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the site URL (required).
    #[must_use]
    pub fn site_url(mut self, site_url: SiteUrl) -> Self {
        self.site_url = Some(site_url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Authenticates with OAuth 1.0a, replacing any Basic credentials.
    #[must_use]
    pub fn oauth(mut self, credentials: OAuthCredentials) -> Self {
        self.credentials = Some(Credentials::OAuth(credentials));
        self
    }

    /// Authenticates with HTTP Basic, replacing any OAuth credentials.
    #[must_use]
    pub fn basic_auth(mut self, credentials: BasicCredentials) -> Self {
        self.credentials = Some(Credentials::Basic(credentials));
        self
    }

    /// Sets the retry budget for throttled requests.
    #[must_use]
    pub const fn max_retries(mut self, budget: RetryBudget) -> Self {
        self.max_retries = Some(budget);
        self
    }

    /// Bounds the total duration of a single call, including retry sleeps.
    #[must_use]
    pub const fn request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = Some(deadline);
        self
    }

    /// Enables or disables mirroring of payloads to the `desk_api::wire` target.
    #[must_use]
    pub const fn log_payloads(mut self, enabled: bool) -> Self {
        self.log_payloads = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`DeskConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `site_url` or the
    /// credentials are not set.
    pub fn build(self) -> Result<DeskConfig, ConfigError> {
        let site_url = self
            .site_url
            .ok_or(ConfigError::MissingRequiredField { field: "site_url" })?;
        let credentials = self
            .credentials
            .ok_or(ConfigError::MissingRequiredField {
                field: "credentials",
            })?;

        Ok(DeskConfig {
            site_url,
            api_version: self.api_version.unwrap_or_default(),
            credentials,
            max_retries: self.max_retries.unwrap_or_default(),
            request_deadline: self.request_deadline,
            log_payloads: self.log_payloads.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteUrl {
        SiteUrl::new("https://example.desk.com").unwrap()
    }

    fn oauth() -> OAuthCredentials {
        OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap()
    }

    #[test]
    fn test_builder_requires_site_url() {
        let result = DeskConfigBuilder::new().oauth(oauth()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "site_url" })
        ));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = DeskConfigBuilder::new().site_url(site()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "credentials"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = DeskConfig::builder()
            .site_url(site())
            .oauth(oauth())
            .build()
            .unwrap();

        assert_eq!(config.api_version(), &ApiVersion::V2);
        assert_eq!(config.max_retries(), RetryBudget::Unlimited);
        assert!(config.request_deadline().is_none());
        assert!(config.log_payloads());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_later_auth_mode_replaces_earlier_one() {
        let config = DeskConfig::builder()
            .site_url(site())
            .oauth(oauth())
            .basic_auth(BasicCredentials::new("agent@example.com", "pw").unwrap())
            .build()
            .unwrap();
        assert!(matches!(config.credentials(), Credentials::Basic(_)));

        let config = DeskConfig::builder()
            .site_url(site())
            .basic_auth(BasicCredentials::new("agent@example.com", "pw").unwrap())
            .oauth(oauth())
            .build()
            .unwrap();
        assert!(matches!(config.credentials(), Credentials::OAuth(_)));
    }

    #[test]
    fn test_api_base_includes_version() {
        let config = DeskConfig::builder()
            .site_url(SiteUrl::new("http://localhost:3000").unwrap())
            .api_version(ApiVersion::Custom("v3".to_string()))
            .oauth(oauth())
            .build()
            .unwrap();

        assert_eq!(config.api_base().as_str(), "http://localhost:3000/api/v3/");
    }

    #[test]
    fn test_api_base_keeps_site_path() {
        let config = DeskConfig::builder()
            .site_url(SiteUrl::new("https://gateway.example.com/desk").unwrap())
            .oauth(oauth())
            .build()
            .unwrap();

        assert_eq!(
            config.api_base().as_str(),
            "https://gateway.example.com/desk/api/v2/"
        );
    }

    #[test]
    fn test_oauth_credentials_reject_empty_components() {
        assert!(matches!(
            OAuthCredentials::new("", "cs", "tk", "ts"),
            Err(ConfigError::EmptyCredential {
                field: "consumer_key"
            })
        ));
        assert!(matches!(
            OAuthCredentials::new("ck", "cs", "tk", ""),
            Err(ConfigError::EmptyCredential {
                field: "token_secret"
            })
        ));
    }

    #[test]
    fn test_config_debug_does_not_leak_secrets() {
        let config = DeskConfig::builder()
            .site_url(site())
            .oauth(OAuthCredentials::new("ck", "very-secret", "tk", "also-secret").unwrap())
            .build()
            .unwrap();

        let debug = format!("{config:?}");
        assert!(debug.contains("DeskConfig"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeskConfig>();
    }
}
