//! Agent group resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

use super::USER;

/// Kind descriptor for `/groups`.
pub const GROUP: ResourceKind = ResourceKind {
    name: "group",
    collection: "groups",
    requires_identity: false,
    nested: &[&USER],
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for Group {
    type ListParams = PageParams;
    type SearchParams = PageParams;

    const KIND: &'static ResourceKind = &GROUP;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_deserialization() {
        let group: Group = serde_json::from_value(json!({
            "name": "Support Ninjas",
            "_links": {
                "self": {"href": "/api/v2/groups/1", "class": "group"},
                "users": {"href": "/api/v2/groups/1/users", "class": "user"}
            }
        }))
        .unwrap();

        assert_eq!(group.name.as_deref(), Some("Support Ninjas"));
        assert_eq!(group.resource_id(), Some("1"));
        assert_eq!(group.links.href_link("users"), Some("/api/v2/groups/1/users"));
    }

    #[test]
    fn test_group_nests_users() {
        assert!(GROUP.supports_nested(&USER));
    }
}
