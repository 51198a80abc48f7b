//! Resource infrastructure for the Desk API.
//!
//! This module provides what every Desk record type shares:
//!
//! - **[`ResourceKind`] / [`ResourcePath`]**: declarative kind descriptors and
//!   the path builder that validates identity and nesting
//! - **[`HalLinks`]**: the `_links` block of HAL responses
//! - **[`Page<R>`]**: a paginated collection whose entries are decoded on
//!   demand by [`Page::unravel`]
//! - **[`Resource`] trait**: get/list/search/create/update and nested lists
//! - **[`ResourceError`] / [`PathError`]**: error types for the above
//!
//! Concrete records (`Case`, `Customer`, ...) live in [`crate::resources`].
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::rest::{PageParams, Resource};
//! use desk_api::resources::{Case, CaseEvent};
//!
//! let case = Case::find(&http, "42", None).await?;
//!
//! let mut events = Case::list_nested::<CaseEvent>(&http, "42", None, None).await?;
//! for event in events.unravel()? {
//!     println!("{:?}", event.event_type);
//! }
//!
//! let mut page = Case::list(&http, Some(PageParams { per_page: Some(50), ..Default::default() }), None).await?;
//! page.unravel()?;
//! while let Some(next) = page.next_href() {
//!     page = Case::fetch_page(&http, next, None).await?;
//!     page.unravel()?;
//! }
//! ```

mod errors;
mod hal;
mod page;
mod params;
mod path;
mod resource;

pub use errors::{PathError, ResourceError};
pub use hal::{HalLinks, HrefLink, LinkEntry};
pub use page::Page;
pub use params::{PageParams, SortDirection};
pub use path::{ResourceKind, ResourcePath};
pub use resource::Resource;

pub(crate) use resource::to_body;
#[cfg(test)]
pub(crate) use resource::serialize_to_query;
