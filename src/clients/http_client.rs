//! HTTP client for Desk API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Desk API with rate-limit aware retry handling.

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Authenticator;
use crate::clients::cancel::CancelToken;
use crate::clients::errors::{ApiError, HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpRequest, RequestTarget, SignedRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{DeskConfig, RetryBudget};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tracing target that receives pretty-printed request and response bodies.
pub const WIRE_LOG_TARGET: &str = "desk_api::wire";

/// HTTP client for making requests to the Desk API.
///
/// The client handles:
/// - URL construction from the site URL and API version
/// - Default headers including `Accept` and `User-Agent`
/// - Per-request authentication (OAuth 1.0a signing or HTTP Basic)
/// - Retrying 429 responses after the server's reset interval
/// - Optional cancellation and per-call deadlines
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`. All per-call state (nonce, buffered body,
/// remaining retries) lives on the stack of the call, so one client can
/// serve any number of concurrent calls.
///
/// # Example
///
/// ```rust,ignore
/// use desk_api::{DeskConfig, OAuthCredentials, SiteUrl};
/// use desk_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = DeskConfig::builder()
///     .site_url(SiteUrl::new("https://example.desk.com")?)
///     .oauth(OAuthCredentials::new("ck", "cs", "tk", "ts")?)
///     .build()?;
/// let client = HttpClient::new(&config);
///
/// let request = client.build_request(HttpRequest::builder(HttpMethod::Get, "/cases").build()?)?;
/// let response = client.execute(&request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    api_base: Url,
    site_root: Url,
    authenticator: Authenticator,
    default_headers: HashMap<String, String>,
    max_retries: RetryBudget,
    request_deadline: Option<Duration>,
    log_payloads: bool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client with its own connection pool.
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self::with_client(config, client)
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(config: &DeskConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}desk-api-rust v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            api_base: config.api_base(),
            site_root: config.site_url().url().clone(),
            authenticator: Authenticator::from_credentials(config.credentials()),
            default_headers,
            max_retries: config.max_retries(),
            request_deadline: config.request_deadline(),
            log_payloads: config.log_payloads(),
        }
    }

    /// Returns the API base URL (`{site}/api/{version}/`).
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the active authentication strategy.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Resolves, encodes and authenticates a request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation,
    /// its body cannot be encoded, or its target cannot be resolved.
    pub fn build_request(&self, request: HttpRequest) -> Result<SignedRequest, HttpError> {
        request.verify()?;

        let mut url = self.resolve(&request.target)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let body = request.encode_body()?;

        let mut headers = self.default_headers.clone();
        if body.is_some() {
            headers.insert(
                "Content-Type".to_string(),
                request.body_type.as_content_type().to_string(),
            );
        }
        headers.extend(request.extra_headers);

        if self.log_payloads {
            match &body {
                Some(bytes) => tracing::debug!(
                    target: WIRE_LOG_TARGET,
                    method = %request.http_method,
                    url = %url,
                    "[request]\n{}",
                    pretty_body(bytes)
                ),
                None => tracing::debug!(
                    target: WIRE_LOG_TARGET,
                    method = %request.http_method,
                    url = %url,
                    "[request]"
                ),
            }
        }

        let mut signed = SignedRequest::new(
            request.http_method,
            url,
            headers,
            String::new(),
            body,
            request.body_type,
        );
        self.authenticate(&mut signed);
        Ok(signed)
    }

    /// Sends a request, retrying throttled attempts.
    ///
    /// On a 429 the client waits for the number of seconds in
    /// `X-Rate-Limit-Reset` and resends, until the configured
    /// [`RetryBudget`] runs out. OAuth requests get a fresh signature for each
    /// resend. Other non-2xx statuses fail immediately.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Network`] on connection failures (never retried)
    /// - [`HttpError::Api`] on a non-2xx response, including a 429 once the
    ///   budget is spent
    /// - [`HttpError::DeadlineExceeded`] if the configured deadline passes
    pub async fn execute(&self, request: &SignedRequest) -> Result<HttpResponse, HttpError> {
        self.run(request, None).await
    }

    /// Like [`execute`](Self::execute), but returns [`HttpError::Cancelled`]
    /// as soon as `cancel` fires, including during a rate-limit wait.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_cancel(
        &self,
        request: &SignedRequest,
        cancel: &CancelToken,
    ) -> Result<HttpResponse, HttpError> {
        self.run(request, Some(cancel)).await
    }

    /// Sends a request and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus
    /// [`HttpError::Decode`] when a 2xx body does not match `T`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: &SignedRequest,
        cancel: Option<&CancelToken>,
    ) -> Result<T, HttpError> {
        let response = self.run(request, cancel).await?;
        let value: T = serde_json::from_slice(&response.body).map_err(|source| {
            HttpError::Decode {
                url: request.url().to_string(),
                source,
            }
        })?;

        if self.log_payloads {
            tracing::debug!(
                target: WIRE_LOG_TARGET,
                method = %request.method(),
                url = %request.url(),
                "[response]\n{}",
                pretty_body(&response.body)
            );
        }
        Ok(value)
    }

    /// Sends a request and copies the body verbatim into `sink`.
    ///
    /// No JSON decoding takes place. The returned response still carries the
    /// body bytes and headers.
    ///
    /// # Errors
    ///
    /// Everything [`execute`](Self::execute) returns, plus [`HttpError::Io`]
    /// when writing to `sink` fails.
    pub async fn execute_raw<W: Write + Send>(
        &self,
        request: &SignedRequest,
        sink: &mut W,
        cancel: Option<&CancelToken>,
    ) -> Result<HttpResponse, HttpError> {
        let response = self.run(request, cancel).await?;
        sink.write_all(&response.body)?;
        sink.flush()?;
        Ok(response)
    }

    /// Builds a request and decodes its JSON response in one step.
    ///
    /// # Errors
    ///
    /// See [`build_request`](Self::build_request) and
    /// [`execute_json`](Self::execute_json).
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        cancel: Option<&CancelToken>,
    ) -> Result<T, HttpError> {
        let signed = self.build_request(request)?;
        self.execute_json(&signed, cancel).await
    }

    /// Checks the OAuth signature of a built request against its own contents.
    ///
    /// Basic-authenticated requests verify when their header matches the
    /// client's credentials.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Sign`] if the `Authorization` header is not a
    /// well-formed OAuth header.
    pub fn verify_signature(&self, request: &SignedRequest) -> Result<bool, HttpError> {
        match &self.authenticator {
            Authenticator::OAuth(signer) => Ok(signer.verify(
                request.method().as_str(),
                request.url(),
                request.form_body(),
                request.authorization(),
            )?),
            Authenticator::Basic(basic) => Ok(basic.header() == request.authorization()),
        }
    }

    fn resolve(&self, target: &RequestTarget) -> Result<Url, InvalidHttpRequestError> {
        let (base, relative) = match target {
            RequestTarget::Path(path) => (&self.api_base, path.trim_start_matches('/')),
            RequestTarget::Href(href) => (&self.site_root, href.as_str()),
        };
        base.join(relative)
            .map_err(|e| InvalidHttpRequestError::InvalidTarget {
                target: target.as_str().to_string(),
                reason: e.to_string(),
            })
    }

    fn authenticate(&self, request: &mut SignedRequest) {
        let authorization = self.authenticator.authorization(
            request.method().as_str(),
            request.url(),
            request.form_body(),
        );
        request.set_authorization(authorization);
    }

    async fn run(
        &self,
        request: &SignedRequest,
        cancel: Option<&CancelToken>,
    ) -> Result<HttpResponse, HttpError> {
        let call = self.within_deadline(self.send_with_retry(request));
        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::debug!(url = %request.url(), "Request cancelled");
                        Err(HttpError::Cancelled)
                    }
                    result = call => result,
                }
            }
            None => call.await,
        }
    }

    async fn within_deadline<F>(&self, call: F) -> Result<HttpResponse, HttpError>
    where
        F: Future<Output = Result<HttpResponse, HttpError>>,
    {
        match self.request_deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .unwrap_or(Err(HttpError::DeadlineExceeded { deadline })),
            None => call.await,
        }
    }

    async fn send_with_retry(&self, request: &SignedRequest) -> Result<HttpResponse, HttpError> {
        let mut budget = self.max_retries;
        let mut resend: Option<SignedRequest> = None;
        let mut attempt: u32 = 0;

        let response = loop {
            attempt += 1;
            let current = resend.as_ref().unwrap_or(request);
            let response = self.send_once(current).await?;

            if !response.is_rate_limited() {
                break response;
            }

            if !budget.try_consume() {
                tracing::warn!(
                    url = %request.url(),
                    attempts = attempt,
                    "Rate limit retries exhausted"
                );
                break response;
            }

            let delay = response.rate_limit_reset();
            tracing::warn!(
                url = %request.url(),
                attempt,
                delay_secs = delay.as_secs(),
                "Rate limited by Desk, waiting for window reset"
            );
            tokio::time::sleep(delay).await;

            if self.authenticator.is_oauth() {
                let mut fresh = request.clone();
                self.authenticate(&mut fresh);
                resend = Some(fresh);
            }
        };

        if response.is_ok() {
            return Ok(response);
        }

        let error = ApiError::from_body(
            response.code,
            request.method().as_str(),
            request.url().as_str(),
            &response.body,
            response.request_id().map(String::from),
        );
        tracing::debug!(code = error.code, url = %error.url, "Desk API returned an error");
        Err(HttpError::Api(error))
    }

    async fn send_once(&self, request: &SignedRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self
            .client
            .request(request.method().into(), request.url().clone())
            .header("Authorization", request.authorization());

        for (key, value) in request.headers() {
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let res = builder.send().await?;
        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, headers, body))
    }
}

/// Parses response headers into a map keyed by lower-case name.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

/// Renders a body for the wire log, pretty-printing JSON when possible.
fn pretty_body(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{DataType, HttpMethod};
    use crate::config::{BasicCredentials, OAuthCredentials, SiteUrl};
    use serde_json::json;

    fn oauth_config() -> DeskConfig {
        DeskConfig::builder()
            .site_url(SiteUrl::new("https://example.desk.com").unwrap())
            .oauth(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_resolves_api_base() {
        let client = HttpClient::new(&oauth_config());
        assert_eq!(client.api_base().as_str(), "https://example.desk.com/api/v2/");
    }

    #[test]
    fn test_default_headers() {
        let client = HttpClient::new(&oauth_config());

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("desk-api-rust v"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = DeskConfig::builder()
            .site_url(SiteUrl::new("https://example.desk.com").unwrap())
            .oauth(OAuthCredentials::new("ck", "cs", "tk", "ts").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | desk-api-rust"));
    }

    #[test]
    fn test_build_request_resolves_path_and_query() {
        let client = HttpClient::new(&oauth_config());
        let request = HttpRequest::builder(HttpMethod::Get, "/customers/search")
            .query_param("email", "ada@example.com")
            .build()
            .unwrap();

        let signed = client.build_request(request).unwrap();
        assert_eq!(
            signed.url().as_str(),
            "https://example.desk.com/api/v2/customers/search?email=ada%40example.com"
        );
        assert!(signed.authorization().starts_with("OAuth "));
        assert!(signed.header("Content-Type").is_none());
    }

    #[test]
    fn test_build_request_resolves_href_against_site_root() {
        let client = HttpClient::new(&oauth_config());
        let request = HttpRequest::href_builder(HttpMethod::Get, "/api/v2/cases?page=2&per_page=50")
            .build()
            .unwrap();

        let signed = client.build_request(request).unwrap();
        assert_eq!(
            signed.url().as_str(),
            "https://example.desk.com/api/v2/cases?page=2&per_page=50"
        );
    }

    #[test]
    fn test_build_request_sets_content_type_and_buffers_body() {
        let client = HttpClient::new(&oauth_config());
        let request = HttpRequest::builder(HttpMethod::Post, "/cases")
            .body(json!({"subject": "Help"}))
            .build()
            .unwrap();

        let signed = client.build_request(request).unwrap();
        assert_eq!(signed.header("content-type"), Some("application/json"));
        assert_eq!(signed.body(), Some(&br#"{"subject":"Help"}"#[..]));
    }

    #[test]
    fn test_built_oauth_request_verifies() {
        let client = HttpClient::new(&oauth_config());
        let request = HttpRequest::builder(HttpMethod::Post, "/cases")
            .query_param("x", "a b")
            .body(json!({"subject": "hi there"}))
            .body_type(DataType::Form)
            .build()
            .unwrap();

        let signed = client.build_request(request).unwrap();
        assert!(client.verify_signature(&signed).unwrap());
    }

    #[test]
    fn test_basic_auth_request_carries_basic_header() {
        let config = DeskConfig::builder()
            .site_url(SiteUrl::new("https://example.desk.com").unwrap())
            .basic_auth(BasicCredentials::new("user", "pass").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config);

        let signed = client
            .build_request(HttpRequest::builder(HttpMethod::Get, "/cases").build().unwrap())
            .unwrap();
        assert_eq!(signed.authorization(), "Basic dXNlcjpwYXNz");
        assert!(client.verify_signature(&signed).unwrap());
    }

    #[test]
    fn test_pretty_body_formats_json_and_passes_text_through() {
        assert_eq!(pretty_body(br#"{"a":1}"#), "{\n  \"a\": 1\n}");
        assert_eq!(pretty_body(b"plain"), "plain");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
