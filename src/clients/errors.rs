//! HTTP-specific error types for the Desk API client.
//!
//! This module contains error types for HTTP operations, including API
//! errors, decode failures and request validation failures.
//!
//! # Error Handling
//!
//! The client uses specific error types for different failure scenarios:
//!
//! - [`ApiError`]: Non-2xx HTTP responses from the API, including a 429 that
//!   outlived the retry budget
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::clients::HttpError;
//!
//! match client.execute(request).await {
//!     Ok(response) => println!("Success: {}", response.code),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::auth::oauth::SignError;

/// Error returned when the API answers with a non-2xx status.
///
/// The body is decoded best-effort from `{"message": .., "errors": {..}}`;
/// a body that does not decode leaves `message` empty and `errors` empty.
///
/// # Example
///
/// ```rust
/// use desk_api::clients::ApiError;
///
/// let error = ApiError::from_body(
///     422,
///     "POST",
///     "https://example.desk.com/api/v2/customers",
///     br#"{"message":"Validation Failed","errors":{"emails":["taken"]}}"#,
///     None,
/// );
/// assert_eq!(error.message, "Validation Failed");
/// assert_eq!(
///     error.to_string(),
///     r#"POST https://example.desk.com/api/v2/customers: 422 Validation Failed: {"emails":["taken"]}"#
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{method} {url}: {code} {message}: {}", errors_json(.errors))]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The HTTP method of the failed request.
    pub method: String,
    /// The absolute URL of the failed request.
    pub url: String,
    /// The top-level `message` of the error body.
    pub message: String,
    /// Field-level error details from the `errors` object.
    pub errors: serde_json::Map<String, Value>,
    /// Request identifier from the `X-Request-Id` header, if present.
    pub request_id: Option<String>,
}

fn errors_json(errors: &serde_json::Map<String, Value>) -> String {
    serde_json::to_string(errors).unwrap_or_else(|_| "{}".to_string())
}

impl ApiError {
    /// Builds an error from a response body, tolerating any body shape.
    #[must_use]
    pub fn from_body(
        code: u16,
        method: impl Into<String>,
        url: impl Into<String>,
        body: &[u8],
        request_id: Option<String>,
    ) -> Self {
        let parsed: Value = serde_json::from_slice(body).unwrap_or_default();
        Self {
            code,
            method: method.into(),
            url: url.into(),
            message: parsed
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            errors: parsed
                .get("errors")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            request_id,
        }
    }

    /// Returns `true` when the server throttled the request.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use desk_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A form body was not a flat JSON object.
    #[error("Form bodies must be a flat JSON object of scalar values.")]
    InvalidFormBody,

    /// The body could not be serialized.
    #[error("Failed to serialize request body: {reason}")]
    Serialize {
        /// Serializer error message.
        reason: String,
    },

    /// The path or href could not be resolved against the base URL.
    #[error("Cannot resolve '{target}' against the API base URL: {reason}")]
    InvalidTarget {
        /// The path or href that failed to resolve.
        target: String,
        /// Parser error message.
        reason: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust
/// use desk_api::clients::HttpError;
/// use std::time::Duration;
///
/// let error = HttpError::DeadlineExceeded { deadline: Duration::from_secs(5) };
/// assert!(error.to_string().contains("5s"));
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or connection error. Never retried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response body was not valid JSON for the expected type.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        /// The request URL.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// An OAuth header could not be parsed or verified.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// Writing the raw response body failed.
    #[error("Failed to write response body: {0}")]
    Io(#[from] std::io::Error),

    /// The call was cancelled through its [`CancelToken`](crate::clients::CancelToken).
    #[error("Request cancelled")]
    Cancelled,

    /// The call did not finish within the configured deadline.
    #[error("Request did not complete within {deadline:?}")]
    DeadlineExceeded {
        /// The configured deadline.
        deadline: Duration,
    },
}

impl HttpError {
    /// Returns the API error, if this is one.
    #[must_use]
    pub const fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
