//! Reply resource.
//!
//! Replies only exist below a case (`/cases/{id}/replies`). The kind has no
//! top-level path, and a fetched reply is addressed by its own `self` link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

/// Kind descriptor for `replies`.
pub const REPLY: ResourceKind = ResourceKind {
    name: "reply",
    collection: "replies",
    requires_identity: true,
    nested: &[],
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Reply {
    /// `in` or `out`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing)]
    pub body_text: Option<String>,
    #[serde(skip_serializing)]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    #[serde(skip_serializing)]
    pub headers_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reply_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    #[serde(skip_serializing)]
    pub client_type: Option<String>,
    #[serde(skip_serializing)]
    pub from_facebook_name: Option<String>,
    #[serde(skip_serializing)]
    pub public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_best_answer: Option<bool>,
    #[serde(skip_serializing)]
    pub rating: Option<f32>,
    #[serde(skip_serializing)]
    pub rating_count: Option<u32>,
    #[serde(skip_serializing)]
    pub rating_score: Option<i32>,
    #[serde(skip_serializing)]
    pub entered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub hidden_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for Reply {
    type ListParams = PageParams;
    type SearchParams = PageParams;

    const KIND: &'static ResourceKind = &REPLY;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ResourceError;
    use serde_json::json;

    #[test]
    fn test_reply_deserialization() {
        let reply: Reply = serde_json::from_value(json!({
            "direction": "out",
            "body": "We are looking into it",
            "status": "sent",
            "type": "email",
            "rating": 4.5,
            "_links": {
                "self": {"href": "/api/v2/cases/1/replies/2", "class": "email"},
                "case": {"href": "/api/v2/cases/1", "class": "case"}
            }
        }))
        .unwrap();

        assert_eq!(reply.reply_type.as_deref(), Some("email"));
        assert_eq!(reply.rating, Some(4.5));
        assert_eq!(reply.resource_id(), Some("2"));
    }

    #[test]
    fn test_reply_requires_identity() {
        assert!(Reply::KIND.requires_identity);
        assert_eq!(Reply::KIND.collection, "replies");
    }

    #[test]
    fn test_reply_path_comes_from_self_link() {
        let reply: Reply = serde_json::from_value(json!({
            "body": "Thanks",
            "_links": {"self": {"href": "/api/v2/cases/1/replies/2", "class": "reply"}}
        }))
        .unwrap();

        assert_eq!(reply.resource_path().unwrap(), "/cases/1/replies/2");
    }

    #[test]
    fn test_reply_without_self_link_has_no_path() {
        assert!(matches!(
            Reply::default().resource_path(),
            Err(ResourceError::MissingIdentity { kind: "reply" })
        ));
    }
}
