//! Case event (history) resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

/// Kind descriptor for `case_events`.
pub const CASE_EVENT: ResourceKind = ResourceKind {
    name: "case_event",
    collection: "case_events",
    requires_identity: false,
    nested: &[],
};

/// One entry of a case's history. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CaseEvent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Field changes, each `{ "field": .., "value": .., "from": .. }`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<Map<String, Value>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for CaseEvent {
    type ListParams = PageParams;
    type SearchParams = PageParams;

    const KIND: &'static ResourceKind = &CASE_EVENT;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_event_deserialization() {
        let event: CaseEvent = serde_json::from_value(json!({
            "type": "case_updated",
            "context": "desk.com",
            "created_at": "2014-01-22T21:43:43Z",
            "changes": [
                {"field": "status", "value": "open", "from": "new"}
            ]
        }))
        .unwrap();

        assert_eq!(event.event_type.as_deref(), Some("case_updated"));
        assert_eq!(event.changes.len(), 1);
        assert_eq!(event.changes[0]["from"], "new");
        assert!(event.links.is_empty());
    }
}
