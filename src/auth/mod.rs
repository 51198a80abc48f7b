//! Authentication strategies for the Desk API.
//!
//! A client authenticates every request in exactly one of two modes:
//!
//! - **OAuth 1.0a**: each request is signed with HMAC-SHA1 ([`oauth`]). The
//!   header changes on every request because of the nonce and timestamp.
//! - **HTTP Basic**: a fixed `Basic` header built from the agent's email and
//!   password ([`BasicAuth`]).
//!
//! [`Authenticator`] is built from the configured [`Credentials`] and is the
//! only thing the transport talks to.
//!
//! # Example
//!
//! ```rust
//! use desk_api::auth::Authenticator;
//! use desk_api::{BasicCredentials, Credentials};
//! use url::Url;
//!
//! let creds = Credentials::Basic(BasicCredentials::new("user", "pass").unwrap());
//! let auth = Authenticator::from_credentials(&creds);
//! let url = Url::parse("https://example.desk.com/api/v2/cases").unwrap();
//!
//! assert_eq!(auth.authorization("GET", &url, None), "Basic dXNlcjpwYXNz");
//! assert!(!auth.is_oauth());
//! ```

mod basic;
pub mod oauth;

pub use basic::BasicAuth;

use url::Url;

use crate::config::Credentials;
use oauth::OAuthSigner;

/// The active authentication strategy of a client.
#[derive(Clone, Debug)]
pub enum Authenticator {
    /// OAuth 1.0a request signing.
    OAuth(OAuthSigner),
    /// HTTP Basic authentication.
    Basic(BasicAuth),
}

impl Authenticator {
    /// Builds the strategy matching the configured credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        match credentials {
            Credentials::OAuth(creds) => Self::OAuth(OAuthSigner::new(creds.clone())),
            Credentials::Basic(creds) => Self::Basic(BasicAuth::new(creds)),
        }
    }

    /// Returns `true` when requests are OAuth-signed.
    ///
    /// OAuth headers must be recomputed whenever a request is resent.
    #[must_use]
    pub const fn is_oauth(&self) -> bool {
        matches!(self, Self::OAuth(_))
    }

    /// Computes the `Authorization` header value for one transmission.
    #[must_use]
    pub fn authorization(&self, method: &str, url: &Url, form_body: Option<&[u8]>) -> String {
        match self {
            Self::OAuth(signer) => signer.sign(method, url, form_body),
            Self::Basic(basic) => basic.header().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasicCredentials, OAuthCredentials};

    fn url() -> Url {
        Url::parse("https://example.desk.com/api/v2/cases").unwrap()
    }

    #[test]
    fn test_oauth_credentials_select_signer() {
        let creds = Credentials::OAuth(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap());
        let auth = Authenticator::from_credentials(&creds);

        assert!(auth.is_oauth());
        let header = auth.authorization("GET", &url(), None);
        assert!(header.starts_with("OAuth "));
    }

    #[test]
    fn test_oauth_header_changes_per_transmission() {
        let creds = Credentials::OAuth(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap());
        let auth = Authenticator::from_credentials(&creds);

        assert_ne!(
            auth.authorization("GET", &url(), None),
            auth.authorization("GET", &url(), None)
        );
    }

    #[test]
    fn test_basic_header_is_stable() {
        let creds = Credentials::Basic(BasicCredentials::new("user", "pass").unwrap());
        let auth = Authenticator::from_credentials(&creds);

        assert_eq!(
            auth.authorization("POST", &url(), None),
            auth.authorization("GET", &url(), None)
        );
    }

    #[test]
    fn test_authenticator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Authenticator>();
    }
}
