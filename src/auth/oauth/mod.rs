//! OAuth 1.0a request signing (RFC 5849, HMAC-SHA1).
//!
//! Desk authenticates API calls with two-legged OAuth 1.0a: every request
//! carries an `Authorization` header signed with the consumer secret and the
//! access token secret. This module computes that header.
//!
//! # Algorithm
//!
//! 1. A 20-character alphanumeric nonce and the current Unix timestamp are
//!    generated per request.
//! 2. The canonical parameter set is built from the URL query, a
//!    form-urlencoded body (if any) and the `oauth_*` fields, each name and
//!    value percent-encoded per RFC 3986 and sorted by name then value
//!    ([`canonical_parameters`]).
//! 3. The signature base string is
//!    `METHOD&enc(base-uri)&enc(parameters)` ([`signature_base_string`]).
//! 4. The signature is `HMAC-SHA1(enc(consumer_secret)&enc(token_secret))`,
//!    base64-encoded and then percent-encoded.
//!
//! # Security
//!
//! Signature verification ([`OAuthSigner::verify`]) uses constant-time
//! comparison. Secrets never appear in `Debug` output.
//!
//! # Example
//!
//! ```rust
//! use desk_api::auth::oauth::{parse_authorization_header, OAuthSigner};
//! use desk_api::OAuthCredentials;
//! use url::Url;
//!
//! let signer = OAuthSigner::new(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap());
//! let url = Url::parse("https://example.desk.com/api/v2/cases?status=open").unwrap();
//!
//! let header = signer.sign("GET", &url, None);
//! let fields = parse_authorization_header(&header).unwrap();
//! assert!(fields.iter().any(|(name, _)| name == "oauth_signature"));
//! ```

mod error;
mod params;
mod signer;

pub use error::SignError;
pub use params::{base_uri, canonical_parameters, percent_encode, signature_base_string};
pub use signer::{
    generate_nonce, parse_authorization_header, OAuthSigner, NONCE_LENGTH, OAUTH_VERSION,
    SIGNATURE_METHOD,
};
