//! Agent (user) resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

/// Kind descriptor for `/users`.
pub const USER: ResourceKind = ResourceKind {
    name: "user",
    collection: "users",
    requires_identity: false,
    nested: &[],
};

/// A Desk agent account. Users are managed in the Desk admin, so every
/// field is read-only through the API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name shown to customers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Permission level, e.g. `agent` or `siteadmin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub current_login_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for User {
    type ListParams = PageParams;
    type SearchParams = PageParams;

    const KIND: &'static ResourceKind = &USER;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_deserialization() {
        let user: User = serde_json::from_value(json!({
            "name": "Grace Hopper",
            "public_name": "Grace",
            "email": "grace@example.com",
            "email_verified": true,
            "level": "siteadmin",
            "created_at": "2013-05-21T18:10:41Z",
            "last_login_at": "2014-03-19T19:33:53Z",
            "_links": {
                "self": {"href": "/api/v2/users/16096734", "class": "user"},
                "preferences": {
                    "href": "/api/v2/users/16096734/preferences",
                    "class": "user_preference"
                }
            }
        }))
        .unwrap();

        assert_eq!(user.public_name.as_deref(), Some("Grace"));
        assert_eq!(user.level.as_deref(), Some("siteadmin"));
        assert!(user.last_login_at.is_some());
        assert_eq!(user.resource_id(), Some("16096734"));
    }

    #[test]
    fn test_login_timestamps_are_not_serialized() {
        let user: User = serde_json::from_value(json!({
            "name": "Grace Hopper",
            "current_login_at": "2014-03-19T19:33:53Z"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"name": "Grace Hopper"})
        );
    }
}
