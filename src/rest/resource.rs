//! Resource trait for Desk records.
//!
//! This module defines the [`Resource`] trait. A record type declares its
//! [`ResourceKind`] and where its `_links` live, and gains `find()`, `list()`,
//! `search()`, `create()`, `update()` and the nested-collection operations.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives and a `_links` field
//! 2. Declare a `const` [`ResourceKind`] for it
//! 3. Implement [`Resource`]; the operations have default implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_api::rest::{HalLinks, PageParams, Resource, ResourceKind};
//! use serde::{Deserialize, Serialize};
//!
//! pub const NOTE: ResourceKind = ResourceKind {
//!     name: "note",
//!     collection: "notes",
//!     requires_identity: false,
//!     nested: &[],
//! };
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Note {
//!     pub body: Option<String>,
//!     #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
//!     pub links: HalLinks,
//! }
//!
//! impl Resource for Note {
//!     type ListParams = PageParams;
//!     type SearchParams = PageParams;
//!     const KIND: &'static ResourceKind = &NOTE;
//!
//!     fn links(&self) -> &HalLinks {
//!         &self.links
//!     }
//! }
//!
//! let note = Note::find(&client, "12", None).await?;
//! let mut page = Note::list(&client, None, None).await?;
//! for note in page.unravel()? {
//!     println!("{:?}", note.body);
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

use crate::clients::{
    CancelToken, HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError,
};
use crate::rest::hal::{api_relative_path, trailing_segment};
use crate::rest::{HalLinks, Page, ResourceError, ResourceKind, ResourcePath};

/// A Desk record that can be fetched, listed, created and updated.
///
/// # Associated Types
///
/// - `ListParams`: query parameters for `list()` (pagination, sorting, embeds)
/// - `SearchParams`: query parameters for `search()`
///
/// # Identity
///
/// Desk does not put an `id` field in every payload. A record's id is the
/// trailing segment of its `_links.self.href`, which is what
/// [`resource_id`](Self::resource_id) returns.
#[allow(async_fn_in_trait)]
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// Parameters for `list()` operations.
    type ListParams: Serialize + Default + Send + Sync;

    /// Parameters for `search()` operations.
    type SearchParams: Serialize + Default + Send + Sync;

    /// The kind descriptor: collection name, identity requirement, nesting.
    const KIND: &'static ResourceKind;

    /// Returns the record's `_links` block.
    fn links(&self) -> &HalLinks;

    /// Returns the `self` href, if the record came from the server.
    fn self_href(&self) -> Option<&str> {
        self.links().self_href()
    }

    /// Returns the record's id, taken from its `self` href.
    fn resource_id(&self) -> Option<&str> {
        self.self_href().and_then(trailing_segment)
    }

    /// Post-decode hook, run on every record the operations return.
    fn initialize(&mut self) {}

    /// Decodes the raw `_embedded.entries` of a page into records.
    ///
    /// The default expects a JSON array and runs
    /// [`initialize`](Self::initialize) on each entry, keeping order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Unravel`] if the entries do not decode.
    fn unravel_entries(raw: &RawValue) -> Result<Vec<Self>, ResourceError> {
        let mut entries: Vec<Self> =
            serde_json::from_str(raw.get()).map_err(|source| ResourceError::Unravel {
                kind: Self::KIND.name,
                source,
            })?;
        entries.iter_mut().for_each(Self::initialize);
        Ok(entries)
    }

    /// Returns the path to this record, relative to the API base.
    ///
    /// Kinds that require identity take the whole path from their `self`
    /// href (`/cases/1/replies/2`); other kinds build `/{collection}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the record has no usable
    /// `self` link.
    fn resource_path(&self) -> Result<String, ResourceError> {
        let missing = || ResourceError::MissingIdentity {
            kind: Self::KIND.name,
        };
        if Self::KIND.requires_identity {
            let path = self
                .self_href()
                .and_then(api_relative_path)
                .ok_or_else(missing)?;
            return Ok(path.to_string());
        }
        let id = self.resource_id().ok_or_else(missing)?;
        Ok(ResourcePath::for_kind(Self::KIND).with_id(id).build()?)
    }

    /// Fetches a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Path`] for an empty id, or
    /// [`ResourceError::Http`] if the request fails.
    async fn find(
        client: &HttpClient,
        id: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<Self, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND).with_id(id).build()?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .build()
            .map_err(HttpError::from)?;
        fetch_record(client, request, cancel).await
    }

    /// Lists the collection.
    ///
    /// The returned page is not yet unraveled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Path`] if the kind cannot be listed without an
    /// id, or [`ResourceError::Http`] if the request fails.
    async fn list(
        client: &HttpClient,
        params: Option<Self::ListParams>,
        cancel: Option<&CancelToken>,
    ) -> Result<Page<Self>, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND).build()?;
        fetch_page_at(client, &path, params.as_ref(), cancel).await
    }

    /// Searches the collection (`GET /{collection}/search`).
    ///
    /// # Errors
    ///
    /// See [`list`](Self::list).
    async fn search(
        client: &HttpClient,
        params: Self::SearchParams,
        cancel: Option<&CancelToken>,
    ) -> Result<Page<Self>, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND)
            .with_action("search")
            .build()?;
        fetch_page_at(client, &path, Some(&params), cancel).await
    }

    /// Lists a nested collection below the record with id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Path`] if `N` is not nested below this kind.
    async fn list_nested<N: Resource>(
        client: &HttpClient,
        id: &str,
        params: Option<N::ListParams>,
        cancel: Option<&CancelToken>,
    ) -> Result<Page<N>, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND)
            .with_id(id)
            .with_nested(N::KIND)
            .build()?;
        fetch_page_at(client, &path, params.as_ref(), cancel).await
    }

    /// Fetches one member of a nested collection.
    ///
    /// # Errors
    ///
    /// See [`list_nested`](Self::list_nested).
    async fn find_nested<N: Resource>(
        client: &HttpClient,
        id: &str,
        nested_id: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<N, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND)
            .with_id(id)
            .with_nested_member(N::KIND, nested_id)
            .build()?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .build()
            .map_err(HttpError::from)?;
        fetch_record(client, request, cancel).await
    }

    /// Follows a pagination href (`next`, `previous`, ...) of a page.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the href cannot be resolved or the
    /// request fails.
    async fn fetch_page(
        client: &HttpClient,
        href: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<Page<Self>, ResourceError> {
        let request = HttpRequest::href_builder(HttpMethod::Get, href)
            .build()
            .map_err(HttpError::from)?;
        Ok(client.request_json(request, cancel).await?)
    }

    /// Creates the record (`POST /{collection}`) and returns the server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the body cannot be serialized or
    /// the request fails.
    async fn create(
        &self,
        client: &HttpClient,
        cancel: Option<&CancelToken>,
    ) -> Result<Self, ResourceError> {
        let path = ResourcePath::for_kind(Self::KIND).build()?;
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(to_body(self)?)
            .build()
            .map_err(HttpError::from)?;
        fetch_record(client, request, cancel).await
    }

    /// Updates the record (`PATCH /{collection}/{id}`) and returns the
    /// server's copy.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the record has no `self`
    /// link, or [`ResourceError::Http`] if the request fails.
    async fn update(
        &self,
        client: &HttpClient,
        cancel: Option<&CancelToken>,
    ) -> Result<Self, ResourceError> {
        let path = self.resource_path()?;
        let request = HttpRequest::builder(HttpMethod::Patch, path)
            .body(to_body(self)?)
            .build()
            .map_err(HttpError::from)?;
        fetch_record(client, request, cancel).await
    }
}

async fn fetch_record<R: Resource>(
    client: &HttpClient,
    request: HttpRequest,
    cancel: Option<&CancelToken>,
) -> Result<R, ResourceError> {
    let mut record: R = client.request_json(request, cancel).await?;
    record.initialize();
    Ok(record)
}

async fn fetch_page_at<R: Resource, P: Serialize>(
    client: &HttpClient,
    path: &str,
    params: Option<&P>,
    cancel: Option<&CancelToken>,
) -> Result<Page<R>, ResourceError> {
    let query = params.map(serialize_to_query).transpose()?.unwrap_or_default();
    let request = HttpRequest::builder(HttpMethod::Get, path)
        .query(query)
        .build()
        .map_err(HttpError::from)?;
    Ok(client.request_json(request, cancel).await?)
}

/// Serializes a record to a JSON request body.
pub(crate) fn to_body<T: Serialize>(value: &T) -> Result<Value, ResourceError> {
    serde_json::to_value(value).map_err(|e| serialize_error(&e))
}

fn serialize_error(e: &serde_json::Error) -> ResourceError {
    ResourceError::Http(HttpError::InvalidRequest(
        InvalidHttpRequestError::Serialize {
            reason: e.to_string(),
        },
    ))
}

/// Serializes a params struct to query pairs.
///
/// `None` fields are skipped, arrays become comma-separated lists and
/// nested objects are flattened into the same level.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<Vec<(String, String)>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| serialize_error(&e))?;

    let mut query = Vec::new();
    if let Value::Object(map) = value {
        append_pairs(&mut query, map);
    }
    Ok(query)
}

fn append_pairs(query: &mut Vec<(String, String)>, map: serde_json::Map<String, Value>) {
    for (key, val) in map {
        match val {
            Value::Null => {}
            Value::String(s) => query.push((key, s)),
            Value::Number(n) => query.push((key, n.to_string())),
            Value::Bool(b) => query.push((key, b.to_string())),
            Value::Array(arr) => {
                let values: Vec<String> = arr
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.push((key, values.join(",")));
                }
            }
            Value::Object(inner) => append_pairs(query, inner),
        }
    }
}
