//! Case resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

use super::{Reply, CASE_EVENT, REPLY};

/// Kind descriptor for `/cases`.
pub const CASE: ResourceKind = ResourceKind {
    name: "case",
    collection: "cases",
    requires_identity: false,
    nested: &[&CASE_EVENT, &REPLY],
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Case {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Channel the case came in on (`email`, `chat`, `twitter`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing)]
    pub blurb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_rules: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing)]
    pub locked_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub changed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub active_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub first_opened_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub first_resolved_at: Option<DateTime<Utc>>,
    /// The first message of the case. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Reply>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for Case {
    type ListParams = PageParams;
    type SearchParams = CaseSearchParams;

    const KIND: &'static ResourceKind = &CASE;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

/// Filters for `GET /cases/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CaseSearchParams {
    /// Free-text query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated statuses, e.g. `new,open`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_updated_at: Option<i64>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::serialize_to_query;
    use serde_json::json;

    #[test]
    fn test_case_deserialization() {
        let case: Case = serde_json::from_value(json!({
            "external_id": null,
            "type": "email",
            "status": "open",
            "subject": "Welcome",
            "blurb": "Thanks for contacting us",
            "priority": 4,
            "labels": ["Spam", "Ignore"],
            "created_at": "2013-05-13T18:12:57Z",
            "custom_fields": {"level": "vip"},
            "_links": {
                "self": {"href": "/api/v2/cases/1", "class": "case"},
                "customer": {"href": "/api/v2/customers/1", "class": "customer"}
            }
        }))
        .unwrap();

        assert_eq!(case.case_type.as_deref(), Some("email"));
        assert_eq!(case.priority, Some(4));
        assert_eq!(case.labels, vec!["Spam", "Ignore"]);
        assert_eq!(
            case.created_at.unwrap().to_rfc3339(),
            "2013-05-13T18:12:57+00:00"
        );
        assert_eq!(case.resource_id(), Some("1"));
        assert_eq!(case.links.href_link("customer"), Some("/api/v2/customers/1"));
    }

    #[test]
    fn test_case_serialization_skips_read_only_fields() {
        let case = Case {
            subject: Some("Printer on fire".into()),
            blurb: Some("ignored".into()),
            created_at: Some(Utc::now()),
            message: Some(Reply {
                direction: Some("in".into()),
                body: Some("Help".into()),
                ..Reply::default()
            }),
            ..Case::default()
        };

        let value = serde_json::to_value(&case).unwrap();
        assert_eq!(
            value,
            json!({
                "subject": "Printer on fire",
                "message": {"direction": "in", "body": "Help"}
            })
        );
    }

    #[test]
    fn test_case_search_params_to_query() {
        let params = CaseSearchParams {
            status: Some("new,open".into()),
            labels: vec!["vip".into(), "billing".into()],
            paging: PageParams {
                per_page: Some(25),
                ..PageParams::default()
            },
            ..CaseSearchParams::default()
        };

        let query = serialize_to_query(&params).unwrap();
        assert!(query.contains(&("status".to_string(), "new,open".to_string())));
        assert!(query.contains(&("labels".to_string(), "vip,billing".to_string())));
        assert!(query.contains(&("per_page".to_string(), "25".to_string())));
        assert_eq!(query.len(), 3);
    }
}
