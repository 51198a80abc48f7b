//! HTTP client types for Desk API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the Desk API. It handles request construction, signing,
//! rate-limit retries and response decoding.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`SignedRequest`]: A resolved request with its `Authorization` header
//! - [`HttpResponse`]: A response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`CancelToken`]: Aborts in-flight calls
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&config);
//! let request = client.build_request(
//!     HttpRequest::builder(HttpMethod::Get, "/cases/42").build()?,
//! )?;
//! let case: serde_json::Value = client.execute_json(&request, None).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: waits `X-Rate-Limit-Reset` seconds (0 when the
//!   header is absent) and resends, as long as the
//!   [`RetryBudget`](crate::RetryBudget) allows. The default budget is
//!   unlimited; pair it with a deadline or a [`CancelToken`] to bound waiting.
//! - **Other non-2xx**: returned immediately as [`ApiError`].
//! - **Network errors**: returned immediately, never retried.

mod cancel;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use cancel::CancelToken;
pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION, WIRE_LOG_TARGET};
pub use http_request::{
    DataType, HttpMethod, HttpRequest, HttpRequestBuilder, RequestTarget, SignedRequest,
};
pub use http_response::{
    HttpResponse, RateLimit, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
    RATE_LIMIT_RESET_HEADER,
};
