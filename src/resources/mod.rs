//! Desk record types.
//!
//! Each record is a plain serde struct with a `_links` field and a `const`
//! [`ResourceKind`](crate::rest::ResourceKind) descriptor:
//!
//! | Record | Kind | Collection | Nested kinds |
//! |---|---|---|---|
//! | [`Case`] | [`CASE`] | `cases` | case events, replies |
//! | [`CaseEvent`] | [`CASE_EVENT`] | `case_events` | |
//! | [`Reply`] | [`REPLY`] | `replies` (below a case only) | |
//! | [`Customer`] | [`CUSTOMER`] | `customers` | cases |
//! | [`Company`] | [`COMPANY`] | `companies` | cases, customers |
//! | [`Job`] | [`JOB`] | `jobs` | |
//! | [`User`] | [`USER`] | `users` | |
//! | [`Group`] | [`GROUP`] | `groups` | users |
//!
//! Fields the server sets (timestamps, blurbs, ratings) are never serialized,
//! so a fetched record can be edited and sent back with `update()`.
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::rest::Resource;
//! use desk_api::resources::{Case, CaseSearchParams};
//!
//! let params = CaseSearchParams {
//!     status: Some("open".to_string()),
//!     ..Default::default()
//! };
//! let mut page = Case::search(&http, params, None).await?;
//! for case in page.unravel()? {
//!     println!("{:?}: {:?}", case.resource_id(), case.subject);
//! }
//! ```

mod case;
mod case_event;
mod company;
mod customer;
mod group;
mod job;
mod reply;
mod user;

pub use case::{Case, CaseSearchParams, CASE};
pub use case_event::{CaseEvent, CASE_EVENT};
pub use company::{Company, CompanySearchParams, COMPANY};
pub use customer::{ContactEntry, Customer, CustomerSearchParams, CUSTOMER};
pub use group::{Group, GROUP};
pub use job::{Job, JOB};
pub use reply::{Reply, REPLY};
pub use user::{User, USER};
