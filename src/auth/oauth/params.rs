//! Parameter normalization for OAuth 1.0a (RFC 5849 section 3.4.1.3).

use url::{form_urlencoded, Url};

/// Percent-encodes a string using the RFC 3986 unreserved set.
///
/// Only `A-Z a-z 0-9 - . _ ~` pass through unchanged; every other byte is
/// written as `%XX` with upper-case hex. A space becomes `%20`, never `+`.
///
/// # Example
///
/// ```rust
/// use desk_api::auth::oauth::percent_encode;
///
/// assert_eq!(percent_encode("a b"), "a%20b");
/// assert_eq!(percent_encode("-._~"), "-._~");
/// assert_eq!(percent_encode("a+b/c"), "a%2Bb%2Fc");
/// ```
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    fn encoded(name: &str, value: &str) -> Self {
        Self {
            name: percent_encode(name),
            value: percent_encode(value),
        }
    }
}

/// Builds the normalized request parameter string.
///
/// The set is the union of the URL query parameters, the form body
/// parameters (when `form_body` is given and non-empty) and `oauth`, minus
/// any `oauth_signature`. Names and values are encoded individually, sorted
/// by name then value, and joined as `name=value` pairs with `&`.
///
/// # Example
///
/// ```rust
/// use desk_api::auth::oauth::canonical_parameters;
/// use url::Url;
///
/// let url = Url::parse("https://example.desk.com/api/v2/cases?b=2&a=1").unwrap();
/// let params = canonical_parameters(&url, None, &[("oauth_nonce", "n")]);
/// assert_eq!(params, "a=1&b=2&oauth_nonce=n");
/// ```
#[must_use]
pub fn canonical_parameters(url: &Url, form_body: Option<&[u8]>, oauth: &[(&str, &str)]) -> String {
    let mut parameters: Vec<Parameter> = url
        .query_pairs()
        .map(|(name, value)| Parameter::encoded(&name, &value))
        .collect();

    if let Some(body) = form_body.filter(|body| !body.is_empty()) {
        parameters.extend(
            form_urlencoded::parse(body).map(|(name, value)| Parameter::encoded(&name, &value)),
        );
    }

    parameters.extend(
        oauth
            .iter()
            .filter(|(name, _)| *name != "oauth_signature")
            .map(|(name, value)| Parameter::encoded(name, value)),
    );

    parameters.sort();

    parameters
        .iter()
        .map(|p| format!("{}={}", p.name, p.value))
        .collect::<Vec<_>>()
        .join("&")
}

/// Returns the base string URI: scheme, authority and path, without query or fragment.
#[must_use]
pub fn base_uri(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    base.to_string()
}

/// Builds the signature base string `METHOD&enc(base-uri)&enc(parameters)`.
///
/// # Example
///
/// ```rust
/// use desk_api::auth::oauth::signature_base_string;
/// use url::Url;
///
/// let url = Url::parse("https://example.desk.com/api/v2/cases?q=1").unwrap();
/// let base = signature_base_string("get", &url, "q=1");
/// assert_eq!(base, "GET&https%3A%2F%2Fexample.desk.com%2Fapi%2Fv2%2Fcases&q%3D1");
/// ```
#[must_use]
pub fn signature_base_string(method: &str, url: &Url, parameters: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_uri(url)),
        percent_encode(parameters)
    )
}
