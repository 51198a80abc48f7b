//! HMAC-SHA1 request signing.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use subtle::ConstantTimeEq;
use url::Url;

use super::error::SignError;
use super::params::{canonical_parameters, percent_encode, signature_base_string};
use crate::config::OAuthCredentials;

type HmacSha1 = Hmac<Sha1>;

/// The only signature method this signer produces.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// The OAuth protocol version sent with every request.
pub const OAUTH_VERSION: &str = "1.0";

/// Length of generated nonces.
pub const NONCE_LENGTH: usize = 20;

/// Generates a fresh 20-character alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Signs requests with OAuth 1.0a HMAC-SHA1.
///
/// The signer is stateless apart from the credentials: every call gets its
/// own nonce and timestamp, so one signer can be shared by concurrent calls.
///
/// # Example
///
/// ```rust
/// use desk_api::auth::oauth::OAuthSigner;
/// use desk_api::OAuthCredentials;
/// use url::Url;
///
/// let signer = OAuthSigner::new(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap());
/// let url = Url::parse("https://example.desk.com/api/v2/cases").unwrap();
///
/// let header = signer.sign_with("GET", &url, None, "abcdefghij0123456789", 1_400_000_000);
/// assert!(header.starts_with("OAuth oauth_consumer_key=\"ck\""));
/// assert!(signer.verify("GET", &url, None, &header).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
}

impl OAuthSigner {
    /// Creates a signer for the given credentials.
    #[must_use]
    pub const fn new(credentials: OAuthCredentials) -> Self {
        Self { credentials }
    }

    /// Returns the credentials this signer uses.
    #[must_use]
    pub const fn credentials(&self) -> &OAuthCredentials {
        &self.credentials
    }

    /// Produces an `Authorization` header with a fresh nonce and the current time.
    ///
    /// `form_body` must only be passed for `application/x-www-form-urlencoded`
    /// bodies; the bytes are borrowed and left untouched.
    #[must_use]
    pub fn sign(&self, method: &str, url: &Url, form_body: Option<&[u8]>) -> String {
        let nonce = generate_nonce();
        let timestamp = chrono::Utc::now().timestamp();
        self.sign_with(method, url, form_body, &nonce, timestamp)
    }

    /// Produces an `Authorization` header with an explicit nonce and timestamp.
    ///
    /// Identical inputs always yield an identical header.
    #[must_use]
    pub fn sign_with(
        &self,
        method: &str,
        url: &Url,
        form_body: Option<&[u8]>,
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let timestamp = timestamp.to_string();
        let fields = [
            ("oauth_consumer_key", self.credentials.consumer_key()),
            ("oauth_token", self.credentials.token_key()),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_version", OAUTH_VERSION),
        ];

        let parameters = canonical_parameters(url, form_body, &fields);
        let base_string = signature_base_string(method, url, &parameters);
        let signature = self.signature(&base_string);

        let mut header = String::from("OAuth ");
        for (name, value) in fields {
            header.push_str(name);
            header.push_str("=\"");
            header.push_str(&percent_encode(value));
            header.push_str("\",");
        }
        header.push_str("oauth_signature=\"");
        header.push_str(&signature);
        header.push('"');
        header
    }

    /// Computes `oauth_signature` for a signature base string.
    ///
    /// The key is `enc(consumer_secret)&enc(token_secret)`; the digest is
    /// base64-encoded and then percent-encoded.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
    pub fn signature(&self, base_string: &str) -> String {
        let key = format!(
            "{}&{}",
            percent_encode(self.credentials.consumer_secret().as_ref()),
            percent_encode(self.credentials.token_secret().as_ref())
        );
        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
        mac.update(base_string.as_bytes());
        let digest = BASE64_STANDARD.encode(mac.finalize().into_bytes());
        percent_encode(&digest)
    }

    /// Checks that `header` carries a signature matching a recomputation over
    /// the same request.
    ///
    /// Returns `Ok(false)` for a well-formed header whose signature does not match.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::MalformedAuthorizationHeader`] when the header
    /// cannot be parsed and [`SignError::MissingParameter`] when it has no
    /// `oauth_signature`.
    pub fn verify(
        &self,
        method: &str,
        url: &Url,
        form_body: Option<&[u8]>,
        header: &str,
    ) -> Result<bool, SignError> {
        let fields = parse_authorization_header(header)?;
        let provided = fields
            .iter()
            .find(|(name, _)| name == "oauth_signature")
            .map(|(_, value)| percent_encode(value))
            .ok_or(SignError::MissingParameter {
                name: "oauth_signature",
            })?;

        let borrowed: Vec<(&str, &str)> = fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let parameters = canonical_parameters(url, form_body, &borrowed);
        let expected = self.signature(&signature_base_string(method, url, &parameters));

        Ok(expected.as_bytes().ct_eq(provided.as_bytes()).into())
    }
}

/// Extracts the `oauth_*` fields from an `Authorization` header.
///
/// Values are percent-decoded. Fields whose name does not start with
/// `oauth_` (such as `realm`) are skipped.
///
/// # Errors
///
/// Returns [`SignError::MalformedAuthorizationHeader`] when the header does
/// not use the `OAuth` scheme or contains a segment that is not `name="value"`.
pub fn parse_authorization_header(header: &str) -> Result<Vec<(String, String)>, SignError> {
    let malformed = |reason: String| {
        tracing::warn!(reason = %reason, "Rejecting malformed OAuth Authorization header");
        SignError::MalformedAuthorizationHeader { reason }
    };

    let rest = header
        .trim()
        .strip_prefix("OAuth ")
        .ok_or_else(|| malformed("expected the 'OAuth' scheme".to_string()))?;

    let mut fields = Vec::new();
    for segment in rest.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, quoted) = segment
            .split_once('=')
            .ok_or_else(|| malformed(format!("segment '{segment}' has no '='")))?;
        let value = quoted
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or_else(|| malformed(format!("value of '{name}' is not quoted")))?;

        if !name.starts_with("oauth_") {
            continue;
        }
        let decoded = urlencoding::decode(value)
            .map_err(|_| malformed(format!("value of '{name}' is not valid UTF-8")))?;
        fields.push((name.to_string(), decoded.into_owned()));
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: &str = "kllo9940pd9333jh0000";
    const TIMESTAMP: i64 = 1_191_242_096;

    fn signer() -> OAuthSigner {
        OAuthSigner::new(
            OAuthCredentials::new(
                "dpf43f3p2l4k3l03",
                "kd94hf93k423kf44",
                "nnch734d00sl2jdk",
                "pfkkdhi9sl3r4s00",
            )
            .unwrap(),
        )
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn signature_of(header: &str) -> String {
        parse_authorization_header(header)
            .unwrap()
            .into_iter()
            .find(|(name, _)| name == "oauth_signature")
            .map(|(_, value)| value)
            .unwrap()
    }

    #[test]
    fn test_nonce_is_twenty_alphanumeric_chars() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn test_rfc5849_reference_signature() {
        // OAuth Core 1.0 appendix A.5 photo request.
        let target = url("http://photos.example.net/photos?file=vacation.jpg&size=original");
        let header = signer().sign_with("GET", &target, None, "kllo9940pd9333jh", TIMESTAMP);

        assert_eq!(signature_of(&header), "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    }

    #[test]
    fn test_signing_is_deterministic_with_fixed_nonce_and_timestamp() {
        let target = url("https://example.desk.com/api/v2/cases?page=2");
        let first = signer().sign_with("GET", &target, None, NONCE, TIMESTAMP);
        let second = signer().sign_with("GET", &target, None, NONCE, TIMESTAMP);
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_single_change_alters_signature() {
        let target = url("https://example.desk.com/api/v2/cases?page=2");
        let baseline = signature_of(&signer().sign_with("GET", &target, None, NONCE, TIMESTAMP));

        let method = signer().sign_with("PUT", &target, None, NONCE, TIMESTAMP);
        let uri = signer().sign_with(
            "GET",
            &url("https://example.desk.com/api/v2/casez?page=2"),
            None,
            NONCE,
            TIMESTAMP,
        );
        let param = signer().sign_with(
            "GET",
            &url("https://example.desk.com/api/v2/cases?page=3"),
            None,
            NONCE,
            TIMESTAMP,
        );
        let body = signer().sign_with("GET", &target, Some(b"a=1"), NONCE, TIMESTAMP);
        let nonce = signer().sign_with("GET", &target, None, "kllo9940pd9333jh0001", TIMESTAMP);

        for header in [method, uri, param, body, nonce] {
            assert_ne!(signature_of(&header), baseline);
        }
    }

    #[test]
    fn test_header_lists_fields_in_fixed_order() {
        let target = url("https://example.desk.com/api/v2/cases");
        let header = signer().sign_with("GET", &target, None, NONCE, TIMESTAMP);
        let names: Vec<String> = parse_authorization_header(&header)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            [
                "oauth_consumer_key",
                "oauth_token",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_nonce",
                "oauth_version",
                "oauth_signature",
            ]
        );
    }

    #[test]
    fn test_verify_accepts_own_header_and_rejects_tampering() {
        let target = url("https://example.desk.com/api/v2/customers/search?email=a%20b%40c.com");
        let header = signer().sign("GET", &target, None);

        assert!(signer().verify("GET", &target, None, &header).unwrap());
        assert!(!signer().verify("POST", &target, None, &header).unwrap());

        let creds = OAuthCredentials::new(
            "dpf43f3p2l4k3l03",
            "other",
            "nnch734d00sl2jdk",
            "pfkkdhi9sl3r4s00",
        )
        .unwrap();
        let other = OAuthSigner::new(creds);
        assert!(!other.verify("GET", &target, None, &header).unwrap());
    }

    #[test]
    fn test_verify_requires_signature() {
        let target = url("https://example.desk.com/api/v2/cases");
        let result = signer().verify("GET", &target, None, "OAuth oauth_nonce=\"x\"");
        assert_eq!(
            result,
            Err(SignError::MissingParameter {
                name: "oauth_signature"
            })
        );
    }

    #[test]
    fn test_parse_rejects_wrong_scheme() {
        assert!(matches!(
            parse_authorization_header("Basic dXNlcjpwYXNz"),
            Err(SignError::MalformedAuthorizationHeader { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unquoted_value() {
        assert!(matches!(
            parse_authorization_header("OAuth oauth_nonce=abc"),
            Err(SignError::MalformedAuthorizationHeader { .. })
        ));
        assert!(matches!(
            parse_authorization_header("OAuth oauth_nonce"),
            Err(SignError::MalformedAuthorizationHeader { .. })
        ));
    }

    #[test]
    fn test_parse_skips_non_oauth_fields_and_decodes_values() {
        let fields =
            parse_authorization_header("OAuth realm=\"Example\", oauth_signature=\"a%2Bb%3D\"")
                .unwrap();
        assert_eq!(
            fields,
            vec![("oauth_signature".to_string(), "a+b=".to_string())]
        );
    }
}
