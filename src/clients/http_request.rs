//! HTTP request types for the Desk API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! describing a call, and [`SignedRequest`], the fully resolved and
//! authenticated form the transport actually sends.

use std::collections::HashMap;
use std::fmt;

use url::{form_urlencoded, Url};

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Desk API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and actions such as merge.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP PATCH method for updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Content type for HTTP request bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataType {
    /// JSON content type (`application/json`).
    #[default]
    Json,
    /// Form content type (`application/x-www-form-urlencoded`).
    ///
    /// Form parameters take part in the OAuth signature.
    Form,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => "application/x-www-form-urlencoded",
        }
    }
}

/// Where a request is addressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestTarget {
    /// A path relative to the API base, e.g. `cases/42` or `/cases/42`.
    Path(String),
    /// An href as returned in `_links`, resolved against the site root,
    /// e.g. `/api/v2/cases?page=2`.
    Href(String),
}

impl RequestTarget {
    /// Returns the raw path or href.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path(s) | Self::Href(s) => s,
        }
    }
}

/// A request to be sent to the Desk API.
///
/// Use [`HttpRequest::builder`] or [`HttpRequest::href_builder`] to
/// construct requests.
///
/// # Example
///
/// ```rust
/// use desk_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "/cases")
///     .query_param("per_page", "50")
///     .build()
///     .unwrap();
///
/// let patch_request = HttpRequest::builder(HttpMethod::Patch, "/cases/42")
///     .body(json!({"subject": "Updated"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path or href for this request.
    pub target: RequestTarget,
    /// The request body, if any.
    pub body: Option<serde_json::Value>,
    /// How the body is encoded on the wire.
    pub body_type: DataType,
    /// Query parameters appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a builder for a path relative to the API base.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, RequestTarget::Path(path.into()))
    }

    /// Creates a builder for an href taken from a `_links` block.
    #[must_use]
    pub fn href_builder(method: HttpMethod, href: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, RequestTarget::Href(href.into()))
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - the method is POST, PUT or PATCH and there is no body
    /// - the body type is form but the body is not a flat object
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        if self.body_type == DataType::Form {
            if let Some(body) = &self.body {
                let flat = body
                    .as_object()
                    .is_some_and(|map| map.values().all(|v| !v.is_object() && !v.is_array()));
                if !flat {
                    return Err(InvalidHttpRequestError::InvalidFormBody);
                }
            }
        }

        Ok(())
    }

    /// Serializes the body to the bytes sent on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the body cannot be serialized
    /// in its declared format.
    pub fn encode_body(&self) -> Result<Option<Vec<u8>>, InvalidHttpRequestError> {
        let Some(body) = &self.body else {
            return Ok(None);
        };

        match self.body_type {
            DataType::Json => serde_json::to_vec(body)
                .map(Some)
                .map_err(|e| InvalidHttpRequestError::Serialize {
                    reason: e.to_string(),
                }),
            DataType::Form => {
                let map = body
                    .as_object()
                    .ok_or(InvalidHttpRequestError::InvalidFormBody)?;
                let mut serializer = form_urlencoded::Serializer::new(String::new());
                for (key, value) in map {
                    match value {
                        serde_json::Value::Null => {}
                        serde_json::Value::String(s) => {
                            serializer.append_pair(key, s);
                        }
                        scalar => {
                            serializer.append_pair(key, &scalar.to_string());
                        }
                    }
                }
                Ok(Some(serializer.finish().into_bytes()))
            }
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    target: RequestTarget,
    body: Option<serde_json::Value>,
    body_type: DataType,
    query: Vec<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, target: RequestTarget) -> Self {
        Self {
            http_method: method,
            target,
            body: None,
            body_type: DataType::Json,
            query: Vec::new(),
            extra_headers: HashMap::new(),
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the encoding of the request body (JSON by default).
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Appends query parameters.
    #[must_use]
    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            target: self.target,
            body: self.body,
            body_type: self.body_type,
            query: self.query,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

/// A resolved, authenticated request ready for transmission.
///
/// The body is buffered so the request can be resent any number of times.
/// `Debug` output masks the `Authorization` header.
#[derive(Clone)]
pub struct SignedRequest {
    method: HttpMethod,
    url: Url,
    headers: HashMap<String, String>,
    authorization: String,
    body: Option<Vec<u8>>,
    body_type: DataType,
}

impl SignedRequest {
    pub(crate) const fn new(
        method: HttpMethod,
        url: Url,
        headers: HashMap<String, String>,
        authorization: String,
        body: Option<Vec<u8>>,
        body_type: DataType,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            authorization,
            body,
            body_type,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the absolute request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the non-authorization headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Looks up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("authorization") {
            return Some(&self.authorization);
        }
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Returns the buffered body bytes.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Returns the body when it is form-encoded, for signing.
    #[must_use]
    pub fn form_body(&self) -> Option<&[u8]> {
        match self.body_type {
            DataType::Form => self.body(),
            DataType::Json => None,
        }
    }

    pub(crate) fn set_authorization(&mut self, authorization: String) {
        self.authorization = authorization;
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("authorization", &"*****")
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .field("body_type", &self.body_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_display_is_upper_case() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Get.as_str(), "GET");
    }

    #[test]
    fn test_body_required_for_mutating_methods() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let result = HttpRequest::builder(method, "/cases").build();
            assert!(matches!(
                result,
                Err(InvalidHttpRequestError::MissingBody { .. })
            ));
        }
        assert!(HttpRequest::builder(HttpMethod::Get, "/cases").build().is_ok());
        assert!(HttpRequest::builder(HttpMethod::Delete, "/cases/1").build().is_ok());
    }

    #[test]
    fn test_query_params_keep_order_and_duplicates() {
        let request = HttpRequest::builder(HttpMethod::Get, "/cases")
            .query_param("labels", "a")
            .query([("labels", "b"), ("page", "2")])
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("labels".to_string(), "a".to_string()),
                ("labels".to_string(), "b".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_body_encoding() {
        let request = HttpRequest::builder(HttpMethod::Post, "/customers")
            .body(json!({"first_name": "Ada"}))
            .build()
            .unwrap();

        let body = request.encode_body().unwrap().unwrap();
        assert_eq!(body, br#"{"first_name":"Ada"}"#);
    }

    #[test]
    fn test_form_body_encoding() {
        let request = HttpRequest::builder(HttpMethod::Post, "/cases")
            .body(json!({"subject": "hello world", "priority": 4, "skip": null}))
            .body_type(DataType::Form)
            .build()
            .unwrap();

        let body = String::from_utf8(request.encode_body().unwrap().unwrap()).unwrap();
        assert!(body.contains("subject=hello+world"));
        assert!(body.contains("priority=4"));
        assert!(!body.contains("skip"));
    }

    #[test]
    fn test_nested_form_body_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "/cases")
            .body(json!({"message": {"body": "x"}}))
            .body_type(DataType::Form)
            .build();
        assert_eq!(result.unwrap_err(), InvalidHttpRequestError::InvalidFormBody);
    }

    #[test]
    fn test_signed_request_header_lookup_and_masking() {
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        let mut request = SignedRequest::new(
            HttpMethod::Get,
            Url::parse("https://example.desk.com/api/v2/cases").unwrap(),
            headers,
            "Basic c2VjcmV0".to_string(),
            None,
            DataType::Json,
        );

        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), Some("Basic c2VjcmV0"));
        assert!(!format!("{request:?}").contains("c2VjcmV0"));

        request.set_authorization("OAuth x".to_string());
        assert_eq!(request.authorization(), "OAuth x");
    }

    #[test]
    fn test_form_body_only_exposed_for_form_requests() {
        let url = Url::parse("https://example.desk.com/api/v2/cases").unwrap();
        let json = SignedRequest::new(
            HttpMethod::Post,
            url.clone(),
            HashMap::new(),
            String::new(),
            Some(b"{}".to_vec()),
            DataType::Json,
        );
        let form = SignedRequest::new(
            HttpMethod::Post,
            url,
            HashMap::new(),
            String::new(),
            Some(b"a=1".to_vec()),
            DataType::Form,
        );

        assert!(json.form_body().is_none());
        assert_eq!(form.form_body(), Some(&b"a=1"[..]));
    }
}
