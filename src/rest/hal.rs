//! HAL (`_links`) support.
//!
//! Desk responses carry a `_links` object mapping relation names to one link
//! or an array of links:
//!
//! ```json
//! {
//!   "self": { "href": "/api/v2/cases/1", "class": "case" },
//!   "customer": { "href": "/api/v2/customers/7", "class": "customer" },
//!   "next": null
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use desk_api::rest::HalLinks;
//!
//! let mut links = HalLinks::default();
//! links.add_href_link("customers", "/api/v2/customers/2");
//! links.add_href_link("customers", "/api/v2/customers/3");
//!
//! assert_eq!(links.href_link("customers"), Some("/api/v2/customers/2"));
//! assert_eq!(links.href_links("customers").len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefLink {
    /// Target path, usually relative to the site root (`/api/v2/...`).
    pub href: String,
    /// The resource class of the target, if the server supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl HrefLink {
    /// Creates a link without a class.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            class: None,
        }
    }

    /// Returns the trailing path segment of the href, ignoring any query.
    ///
    /// ```rust
    /// use desk_api::rest::HrefLink;
    ///
    /// assert_eq!(HrefLink::new("/api/v2/jobs/abc123").trailing_segment(), Some("abc123"));
    /// assert_eq!(HrefLink::new("").trailing_segment(), None);
    /// ```
    #[must_use]
    pub fn trailing_segment(&self) -> Option<&str> {
        trailing_segment(&self.href)
    }
}

/// Returns the last non-empty path segment of an href.
pub(crate) fn trailing_segment(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Returns the part of an href below the API version prefix.
///
/// `/api/v2/cases/1/replies/2` becomes `/cases/1/replies/2`. Absolute hrefs
/// and site path prefixes in front of `/api/` are accepted.
pub(crate) fn api_relative_path(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let after_api = &path[path.find("/api/")? + "/api/".len()..];
    let relative = after_api[after_api.find('/')?..].trim_end_matches('/');
    (relative.len() > 1).then_some(relative)
}

/// One relation's links: a single object or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkEntry {
    /// A single link.
    One(HrefLink),
    /// Several links under one relation.
    Many(Vec<HrefLink>),
}

impl LinkEntry {
    /// Returns the links as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[HrefLink] {
        match self {
            Self::One(link) => std::slice::from_ref(link),
            Self::Many(links) => links,
        }
    }
}

/// The `_links` block of a resource or page.
///
/// Relations the server sends as `null` are kept but report no links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HalLinks(BTreeMap<String, Option<LinkEntry>>);

impl HalLinks {
    /// Returns `true` if there are no relations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the links of a relation (empty if absent or `null`).
    #[must_use]
    pub fn links(&self, rel: &str) -> &[HrefLink] {
        self.0
            .get(rel)
            .and_then(Option::as_ref)
            .map_or(&[], LinkEntry::as_slice)
    }

    /// Returns the href of the first link of a relation.
    #[must_use]
    pub fn href_link(&self, rel: &str) -> Option<&str> {
        self.links(rel).first().map(|link| link.href.as_str())
    }

    /// Returns every href of a relation.
    #[must_use]
    pub fn href_links(&self, rel: &str) -> Vec<&str> {
        self.links(rel).iter().map(|link| link.href.as_str()).collect()
    }

    /// Returns the `self` href.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.href_link("self")
    }

    /// Appends a link to a relation.
    ///
    /// The first link is stored as a single object; adding a second turns
    /// the relation into an array.
    pub fn add_href_link(&mut self, rel: impl Into<String>, href: impl Into<String>) {
        let link = HrefLink::new(href);
        let entry = self.0.entry(rel.into()).or_insert(None);
        *entry = Some(match entry.take() {
            None => LinkEntry::One(link),
            Some(LinkEntry::One(first)) => LinkEntry::Many(vec![first, link]),
            Some(LinkEntry::Many(mut links)) => {
                links.push(link);
                LinkEntry::Many(links)
            }
        });
    }

    /// Replaces a relation with a single link.
    pub fn set_href_link(&mut self, rel: impl Into<String>, href: impl Into<String>) {
        self.0
            .insert(rel.into(), Some(LinkEntry::One(HrefLink::new(href))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_single_array_and_null_links() {
        let links: HalLinks = serde_json::from_value(json!({
            "self": {"href": "/api/v2/cases/1", "class": "case"},
            "labels": [
                {"href": "/api/v2/labels/1", "class": "label"},
                {"href": "/api/v2/labels/2", "class": "label"}
            ],
            "next": null
        }))
        .unwrap();

        assert_eq!(links.self_href(), Some("/api/v2/cases/1"));
        assert_eq!(links.links("self")[0].class.as_deref(), Some("case"));
        assert_eq!(
            links.href_links("labels"),
            vec!["/api/v2/labels/1", "/api/v2/labels/2"]
        );
        assert_eq!(links.href_link("next"), None);
        assert_eq!(links.href_link("missing"), None);
    }

    #[test]
    fn test_add_href_link_promotes_to_array() {
        let mut links = HalLinks::default();
        links.add_href_link("customers", "/api/v2/customers/2");
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({"customers": {"href": "/api/v2/customers/2"}})
        );

        links.add_href_link("customers", "/api/v2/customers/3");
        links.add_href_link("customers", "/api/v2/customers/4");
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!({"customers": [
                {"href": "/api/v2/customers/2"},
                {"href": "/api/v2/customers/3"},
                {"href": "/api/v2/customers/4"}
            ]})
        );
    }

    #[test]
    fn test_set_href_link_replaces() {
        let mut links = HalLinks::default();
        links.add_href_link("customer", "/a");
        links.add_href_link("customer", "/b");
        links.set_href_link("customer", "/c");
        assert_eq!(links.href_links("customer"), vec!["/c"]);
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(trailing_segment("/api/v2/jobs/abc123"), Some("abc123"));
        assert_eq!(trailing_segment("/api/v2/jobs/abc123/"), Some("abc123"));
        assert_eq!(trailing_segment("/api/v2/cases/9?embed=customer"), Some("9"));
        assert_eq!(trailing_segment("/"), None);
    }

    #[test]
    fn test_api_relative_path() {
        assert_eq!(
            api_relative_path("/api/v2/cases/1/replies/2"),
            Some("/cases/1/replies/2")
        );
        assert_eq!(
            api_relative_path("https://example.desk.com/desk/api/v2/cases/1/?embed=x"),
            Some("/cases/1")
        );
        assert_eq!(api_relative_path("/api/v2/"), None);
        assert_eq!(api_relative_path("/cases/1"), None);
    }
}
