//! Customer resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

use super::CASE;

/// Kind descriptor for `/customers`.
pub const CUSTOMER: ResourceKind = ResourceKind {
    name: "customer",
    collection: "customers",
    requires_identity: false,
    nested: &[&CASE],
};

/// A typed contact detail (email, phone number, address).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactEntry {
    /// `home`, `work`, `mobile`, `other`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ContactEntry {
    /// Creates an entry of the given type.
    #[must_use]
    pub fn new(contact_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            contact_type: Some(contact_type.into()),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing)]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_private_portal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_company_cases: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<ContactEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<ContactEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<ContactEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing)]
    pub locked_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Customer {
    /// Returns the first email address, if any.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.iter().find_map(|entry| entry.value.as_deref())
    }
}

impl Resource for Customer {
    type ListParams = PageParams;
    type SearchParams = CustomerSearchParams;

    const KIND: &'static ResourceKind = &CUSTOMER;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

/// Filters for `GET /customers/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerSearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
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
    use serde_json::json;

    #[test]
    fn test_customer_deserialization() {
        let customer: Customer = serde_json::from_value(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "company": "Analytical Engines",
            "emails": [{"type": "work", "value": "ada@example.com"}],
            "phone_numbers": [],
            "custom_fields": {"tier": "gold"},
            "created_at": "2013-06-04T23:00:36Z",
            "_links": {
                "self": {"href": "/api/v2/customers/17", "class": "customer"},
                "cases": {"href": "/api/v2/customers/17/cases", "class": "case"}
            }
        }))
        .unwrap();

        assert_eq!(customer.primary_email(), Some("ada@example.com"));
        assert_eq!(customer.emails[0].contact_type.as_deref(), Some("work"));
        assert_eq!(customer.resource_id(), Some("17"));
        assert!(customer.phone_numbers.is_empty());
    }

    #[test]
    fn test_customer_serialization() {
        let customer = Customer {
            first_name: Some("Ada".into()),
            emails: vec![ContactEntry::new("home", "ada@example.com")],
            avatar: Some("https://example.com/a.png".into()),
            ..Customer::default()
        };

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "first_name": "Ada",
                "emails": [{"type": "home", "value": "ada@example.com"}]
            })
        );
    }

    #[test]
    fn test_customer_nests_cases() {
        assert!(Customer::KIND.supports_nested(&CASE));
    }
}
