//! HTTP response types for the Desk API client.
//!
//! This module provides the [`HttpResponse`] type and the [`RateLimit`]
//! snapshot parsed from Desk's `X-Rate-Limit-*` headers.

use std::collections::HashMap;
use std::time::Duration;

/// Header carrying the seconds until the rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Header carrying the request ceiling of the current window.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-rate-limit-limit";

/// Header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-rate-limit-remaining";

/// Rate limit information parsed from the `X-Rate-Limit-*` headers.
///
/// # Example
///
/// ```rust
/// use desk_api::clients::RateLimit;
///
/// let limit = RateLimit::parse("60", "12", "30").unwrap();
/// assert_eq!(limit.limit, 60);
/// assert_eq!(limit.remaining, 12);
/// assert_eq!(limit.reset_secs, 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed per window.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset_secs: u64,
}

impl RateLimit {
    /// Parses the three header values.
    ///
    /// Returns `None` if any of them is not a non-negative integer.
    #[must_use]
    pub fn parse(limit: &str, remaining: &str, reset: &str) -> Option<Self> {
        Some(Self {
            limit: limit.trim().parse().ok()?,
            remaining: remaining.trim().parse().ok()?,
            reset_secs: reset.trim().parse().ok()?,
        })
    }
}

/// An HTTP response from the Desk API.
///
/// The body is kept as raw bytes so it can either be decoded as JSON or
/// copied verbatim to a sink.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-case name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Rate limit information, when the server sent all three headers.
    pub rate_limit: Option<RateLimit>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the rate-limit headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        };
        let rate_limit = match (
            first(RATE_LIMIT_LIMIT_HEADER),
            first(RATE_LIMIT_REMAINING_HEADER),
            first(RATE_LIMIT_RESET_HEADER),
        ) {
            (Some(limit), Some(remaining), Some(reset)) => {
                RateLimit::parse(limit, remaining, reset)
            }
            _ => None,
        };

        Self {
            code,
            headers,
            body,
            rate_limit,
        }
    }

    /// Returns `true` if the response status code is 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` if the server throttled the request.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }

    /// Returns the first value of a header (name is matched case-insensitively).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the request ID from the `X-Request-Id` header.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns how long to wait before resending a throttled request.
    ///
    /// This is the integer number of seconds in `X-Rate-Limit-Reset`. A
    /// missing or unparsable header means no wait.
    ///
    /// # Example
    ///
    /// ```rust
    /// use desk_api::clients::HttpResponse;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("x-rate-limit-reset".to_string(), vec!["7".to_string()]);
    /// let response = HttpResponse::new(429, headers, Vec::new());
    /// assert_eq!(response.rate_limit_reset(), Duration::from_secs(7));
    ///
    /// let response = HttpResponse::new(429, HashMap::new(), Vec::new());
    /// assert_eq!(response.rate_limit_reset(), Duration::ZERO);
    /// ```
    #[must_use]
    pub fn rate_limit_reset(&self) -> Duration {
        let seconds = self
            .header(RATE_LIMIT_RESET_HEADER)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(0);
        Duration::from_secs(seconds)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
