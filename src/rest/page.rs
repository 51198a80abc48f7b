//! Paginated HAL collections.
//!
//! List and search responses arrive as a HAL page:
//!
//! ```json
//! {
//!   "total_entries": 2,
//!   "page": 1,
//!   "_links": {
//!     "self": { "href": "/api/v2/cases?page=1&per_page=50" },
//!     "next": null
//!   },
//!   "_embedded": { "entries": [ { "subject": "..." }, { "subject": "..." } ] }
//! }
//! ```
//!
//! [`Page`] decodes the envelope and keeps the embedded entries as raw JSON.
//! [`Page::unravel`] turns them into typed records exactly once, using the
//! record's [`Resource::unravel_entries`].

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::rest::{HalLinks, Resource, ResourceError};

#[derive(Debug, Clone, Default, Deserialize)]
struct RawEmbedded {
    #[serde(default)]
    entries: Option<Box<RawValue>>,
}

/// A page of a HAL collection.
///
/// # Example
///
/// ```rust
/// use desk_api::rest::{Page, ResourceError};
/// use desk_api::resources::Case;
///
/// let mut page: Page<Case> = serde_json::from_str(r#"{
///     "total_entries": 1,
///     "page": 1,
///     "_links": { "next": null },
///     "_embedded": { "entries": [ { "subject": "Printer on fire" } ] }
/// }"#).unwrap();
///
/// let cases = page.unravel().unwrap();
/// assert_eq!(cases[0].subject.as_deref(), Some("Printer on fire"));
/// assert!(matches!(page.unravel(), Err(ResourceError::PayloadConsumed)));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = ""))]
pub struct Page<R> {
    /// Number of entries across all pages.
    #[serde(default)]
    pub total_entries: Option<u64>,
    /// The 1-based page number.
    #[serde(default)]
    pub page: Option<u64>,
    /// Navigation links (`self`, `first`, `last`, `next`, `previous`).
    #[serde(rename = "_links", default)]
    pub links: HalLinks,
    #[serde(rename = "_embedded", default)]
    embedded: Option<RawEmbedded>,
    #[serde(skip)]
    entries: Vec<R>,
    #[serde(skip)]
    consumed: bool,
}

impl<R> Page<R> {
    /// Returns the typed entries. Empty until [`unravel`](Self::unravel) succeeds.
    #[must_use]
    pub fn entries(&self) -> &[R] {
        &self.entries
    }

    /// Consumes the page and returns the typed entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<R> {
        self.entries
    }

    /// Returns `true` once the embedded payload has been unraveled.
    #[must_use]
    pub const fn is_unraveled(&self) -> bool {
        self.consumed
    }

    /// Returns `true` if the server linked a following page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_href().is_some()
    }

    /// Returns the href of the following page.
    #[must_use]
    pub fn next_href(&self) -> Option<&str> {
        self.links.href_link("next")
    }

    /// Returns the href of the preceding page.
    #[must_use]
    pub fn previous_href(&self) -> Option<&str> {
        self.links.href_link("previous")
    }
}

impl<R: Resource> Page<R> {
    /// Decodes the embedded entries into typed records.
    ///
    /// The raw payload is released whether or not decoding succeeds, so this
    /// can only be called once per page. A page without an `_embedded` block
    /// unravels to no entries.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::PayloadConsumed`] on every call after the first
    /// - [`ResourceError::Unravel`] if the entries do not decode as `R`
    pub fn unravel(&mut self) -> Result<&[R], ResourceError> {
        if self.consumed {
            return Err(ResourceError::PayloadConsumed);
        }
        self.consumed = true;

        let raw = self.embedded.take().and_then(|embedded| embedded.entries);
        self.entries = match raw {
            Some(raw) => R::unravel_entries(&raw)?,
            None => Vec::new(),
        };

        tracing::debug!(
            kind = R::KIND.name,
            entries = self.entries.len(),
            "Unraveled page"
        );
        Ok(&self.entries)
    }
}

impl<R: Serialize> Serialize for Page<R> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        #[derive(Serialize)]
        struct Embedded<'a, E: ?Sized> {
            entries: &'a E,
        }

        let mut state = serializer.serialize_struct("Page", 4)?;
        state.serialize_field("total_entries", &self.total_entries)?;
        state.serialize_field("page", &self.page)?;
        state.serialize_field("_links", &self.links)?;
        match &self.embedded {
            Some(RawEmbedded { entries: Some(raw) }) => {
                state.serialize_field("_embedded", &Embedded { entries: &**raw })?;
            }
            _ => {
                state.serialize_field(
                    "_embedded",
                    &Embedded {
                        entries: self.entries.as_slice(),
                    },
                )?;
            }
        }
        state.end()
    }
}
