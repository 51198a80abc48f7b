//! Company resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rest::{HalLinks, PageParams, Resource, ResourceKind};

use super::{CASE, CUSTOMER};

/// Kind descriptor for `/companies`.
pub const COMPANY: ResourceKind = ResourceKind {
    name: "company",
    collection: "companies",
    requires_identity: false,
    nested: &[&CASE, &CUSTOMER],
};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Company {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email domains that map customers to this company.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    #[serde(skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_links", default, skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

impl Resource for Company {
    type ListParams = PageParams;
    type SearchParams = CompanySearchParams;

    const KIND: &'static ResourceKind = &COMPANY;

    fn links(&self) -> &HalLinks {
        &self.links
    }
}

/// Filters for `GET /companies/search`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CompanySearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub paging: PageParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_round_trip_fields() {
        let company: Company = serde_json::from_value(json!({
            "name": "Acme",
            "domains": ["acme.com", "acme.org"],
            "created_at": "2013-11-22T22:49:44Z",
            "_links": {"self": {"href": "/api/v2/companies/5", "class": "company"}}
        }))
        .unwrap();

        assert_eq!(company.domains.len(), 2);
        assert_eq!(company.resource_id(), Some("5"));

        let body = serde_json::to_value(&company).unwrap();
        assert!(body.get("created_at").is_none());
        assert_eq!(body["_links"]["self"]["href"], "/api/v2/companies/5");
    }
}
