//! # Desk API Rust Client
//!
//! An async Rust client for the Desk help-desk REST API, covering cases,
//! customers, companies, replies, case history, agents, groups and
//! asynchronous jobs.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DeskConfig`] and [`DeskConfigBuilder`]
//! - OAuth 1.0a (HMAC-SHA1) request signing, or HTTP Basic authentication
//! - An async HTTP transport that waits out `429` rate limits using the
//!   server's `X-Rate-Limit-Reset` header
//! - Cancellation tokens and per-call deadlines
//! - HAL pagination with typed, exactly-once decoding of embedded entries
//! - Service objects for each resource family via [`DeskClient`]
//!
//! ## Quick Start
//!
//! ```rust
//! use desk_api::{DeskClient, DeskConfig, OAuthCredentials, RetryBudget, SiteUrl};
//! use std::time::Duration;
//!
//! let config = DeskConfig::builder()
//!     .site_url(SiteUrl::new("https://example.desk.com").unwrap())
//!     .oauth(OAuthCredentials::new("consumer-key", "consumer-secret", "token", "token-secret").unwrap())
//!     .max_retries(RetryBudget::Limited(3))
//!     .request_deadline(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! let desk = DeskClient::new(&config);
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use desk_api::services::MergeOverrides;
//!
//! // Fetch a single case
//! let case = desk.cases().get("42").await?;
//!
//! // List a case's history, already decoded
//! let events = desk.cases().events("42", None).await?;
//! for event in events.entries() {
//!     println!("{:?}", event.event_type);
//! }
//!
//! // Merge two customers into a third and poll the job
//! let keep = desk.customers().get("1").await?;
//! let a = desk.customers().get("2").await?;
//! let b = desk.customers().get("3").await?;
//! let job_id = desk.customers().merge(&keep, MergeOverrides::default(), &[&a, &b]).await?;
//! let job = desk.jobs().get(&job_id).await?;
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber.
//! Request and response bodies are logged at `debug` under the
//! [`WIRE_LOG_TARGET`](clients::WIRE_LOG_TARGET) target unless
//! [`DeskConfigBuilder::log_payloads`] turns them off.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: clients are `Send + Sync`; per-request state is call-local
//! - **Async-first**: designed for the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;
pub mod rest;
pub mod services;

// Re-export public types at crate root for convenience
pub use config::{
    ApiVersion, BasicCredentials, Credentials, DeskConfig, DeskConfigBuilder, OAuthCredentials,
    RetryBudget, Secret, SiteUrl,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, CancelToken, DataType, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, SignedRequest,
};

// Re-export resource infrastructure
pub use rest::{Page, PathError, Resource, ResourceError};
pub use services::DeskClient;
