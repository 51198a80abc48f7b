//! Top-level Desk client and per-resource services.
//!
//! [`DeskClient`] owns the transport and hands out lightweight service views:
//!
//! - [`CaseService`] via [`DeskClient::cases`]
//! - [`CustomerService`] via [`DeskClient::customers`]
//! - [`CompanyService`] via [`DeskClient::companies`]
//! - [`JobService`] via [`DeskClient::jobs`]
//! - [`UserService`] via [`DeskClient::users`]
//! - [`GroupService`] via [`DeskClient::groups`]
//!
//! List, search and nested-list operations return a [`Page`] that has
//! already been unraveled; read it with [`Page::entries`] or
//! [`Page::into_entries`] and follow it with [`DeskClient::next_page`].
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::{DeskClient, DeskConfig, OAuthCredentials, SiteUrl};
//!
//! let config = DeskConfig::builder()
//!     .site_url(SiteUrl::new("https://example.desk.com")?)
//!     .oauth(OAuthCredentials::new("ck", "cs", "tk", "ts")?)
//!     .build()?;
//! let desk = DeskClient::new(&config);
//!
//! let case = desk.cases().get("42").await?;
//! let mut page = desk.customers().list(None).await?;
//! loop {
//!     for customer in page.entries() {
//!         println!("{:?}", customer.primary_email());
//!     }
//!     match desk.next_page(&page).await? {
//!         Some(next) => page = next,
//!         None => break,
//!     }
//! }
//! ```

mod case_service;
mod company_service;
mod customer_service;
mod group_service;
mod job_service;
mod user_service;

use crate::clients::{CancelToken, HttpClient};
use crate::config::DeskConfig;
use crate::rest::{Page, Resource, ResourceError};

pub use case_service::CaseService;
pub use company_service::CompanyService;
pub use customer_service::{CustomerService, MergeOverrides};
pub use group_service::GroupService;
pub use job_service::JobService;
pub use user_service::UserService;

/// Client for the Desk API.
///
/// # Thread Safety
///
/// `DeskClient` is `Send + Sync`; share it by reference or behind an `Arc`.
///
/// # Cancellation
///
/// A client built with [`with_cancel`](Self::with_cancel) aborts every
/// in-flight call, including rate-limit waits, once the token fires.
#[derive(Debug)]
pub struct DeskClient {
    http: HttpClient,
    cancel: Option<CancelToken>,
}

// Verify DeskClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DeskClient>();
};

impl DeskClient {
    /// Creates a client with its own connection pool.
    #[must_use]
    pub fn new(config: &DeskConfig) -> Self {
        Self::from_http(HttpClient::new(config))
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(config: &DeskConfig, client: reqwest::Client) -> Self {
        Self::from_http(HttpClient::with_client(config, client))
    }

    /// Wraps an already configured transport.
    #[must_use]
    pub const fn from_http(http: HttpClient) -> Self {
        Self { http, cancel: None }
    }

    /// Attaches a cancellation token to every call made through this client.
    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the attached cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Case operations.
    #[must_use]
    pub const fn cases(&self) -> CaseService<'_> {
        CaseService::new(self)
    }

    /// Customer operations.
    #[must_use]
    pub const fn customers(&self) -> CustomerService<'_> {
        CustomerService::new(self)
    }

    /// Company operations.
    #[must_use]
    pub const fn companies(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    /// Job operations.
    #[must_use]
    pub const fn jobs(&self) -> JobService<'_> {
        JobService::new(self)
    }

    /// Agent operations.
    #[must_use]
    pub const fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Agent group operations.
    #[must_use]
    pub const fn groups(&self) -> GroupService<'_> {
        GroupService::new(self)
    }

    /// Fetches and unravels the page after `page`, or `None` on the last page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn next_page<R: Resource>(
        &self,
        page: &Page<R>,
    ) -> Result<Option<Page<R>>, ResourceError> {
        let Some(href) = page.next_href() else {
            return Ok(None);
        };
        let next = R::fetch_page(&self.http, href, self.cancel_token()).await?;
        unraveled(next).map(Some)
    }

    /// Fetches and unravels the page before `page`, or `None` on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn previous_page<R: Resource>(
        &self,
        page: &Page<R>,
    ) -> Result<Option<Page<R>>, ResourceError> {
        let Some(href) = page.previous_href() else {
            return Ok(None);
        };
        let previous = R::fetch_page(&self.http, href, self.cancel_token()).await?;
        unraveled(previous).map(Some)
    }
}

/// Unravels a freshly decoded page.
pub(crate) fn unraveled<R: Resource>(mut page: Page<R>) -> Result<Page<R>, ResourceError> {
    page.unravel()?;
    Ok(page)
}
