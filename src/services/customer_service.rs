use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpError, HttpMethod, HttpRequest};
use crate::rest::{
    to_body, HalLinks, HrefLink, Page, PageParams, Resource, ResourceError, ResourcePath,
};
use crate::resources::{Case, Customer, CustomerSearchParams, CUSTOMER};
use crate::services::{unraveled, DeskClient};

/// Field values that win when customers are merged.
///
/// Fields left as `None` keep the surviving customer's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    /// Filled by [`CustomerService::merge`] with the merged-away customers.
    #[serde(rename = "_links", skip_serializing_if = "HalLinks::is_empty")]
    pub links: HalLinks,
}

#[derive(Debug, Deserialize)]
struct MergeResponse {
    #[serde(rename = "_links", default)]
    links: HalLinks,
}

/// Operations on `/customers`.
#[derive(Debug, Clone, Copy)]
pub struct CustomerService<'a> {
    client: &'a DeskClient,
}

impl<'a> CustomerService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves a customer (`GET /customers/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<Customer, ResourceError> {
        Customer::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists customers (`GET /customers`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<Customer>, ResourceError> {
        let page = Customer::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Searches customers (`GET /customers/search`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn search(
        &self,
        params: CustomerSearchParams,
    ) -> Result<Page<Customer>, ResourceError> {
        let page = Customer::search(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Creates a customer (`POST /customers`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(&self, customer: &Customer) -> Result<Customer, ResourceError> {
        customer.create(self.client.http(), self.client.cancel_token()).await
    }

    /// Updates a customer (`PATCH /customers/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the customer has no
    /// `self` link, or another [`ResourceError`] if the request fails.
    pub async fn update(&self, customer: &Customer) -> Result<Customer, ResourceError> {
        customer.update(self.client.http(), self.client.cancel_token()).await
    }

    /// Lists the customer's cases (`GET /customers/{id}/cases`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn cases(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<Case>, ResourceError> {
        let page = Customer::list_nested::<Case>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }

    /// Merges `merged` into `customer` (`POST /customers/{id}/merge`).
    ///
    /// The merge runs asynchronously on the server. The returned string is
    /// the id of the job to poll with
    /// [`JobService::get`](crate::services::JobService::get).
    ///
    /// # Errors
    ///
    /// - [`ResourceError::MissingIdentity`] if any customer lacks a `self` link
    /// - [`ResourceError::MissingJobLink`] if the response has no usable
    ///   `job` link
    /// - another [`ResourceError`] if the request fails
    pub async fn merge(
        &self,
        customer: &Customer,
        mut overrides: MergeOverrides,
        merged: &[&Customer],
    ) -> Result<String, ResourceError> {
        let missing = || ResourceError::MissingIdentity {
            kind: CUSTOMER.name,
        };

        for other in merged {
            let href = other.self_href().ok_or_else(missing)?;
            overrides.links.add_href_link("customers", href);
        }

        let id = customer.resource_id().ok_or_else(missing)?;
        let path = ResourcePath::for_kind(&CUSTOMER)
            .with_id(id)
            .with_action("merge")
            .build()?;

        let request = HttpRequest::builder(HttpMethod::Post, path)
            .body(to_body(&overrides)?)
            .build()
            .map_err(HttpError::from)?;
        let response: MergeResponse = self
            .client
            .http()
            .request_json(request, self.client.cancel_token())
            .await?;

        let job_id = response
            .links
            .links("job")
            .first()
            .and_then(HrefLink::trailing_segment)
            .ok_or(ResourceError::MissingJobLink)?;

        tracing::debug!(
            customer = id,
            job = job_id,
            merged = merged.len(),
            "Customer merge queued"
        );
        Ok(job_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overrides_serialization() {
        let mut overrides = MergeOverrides {
            first_name: Some("Ada".into()),
            ..MergeOverrides::default()
        };
        assert_eq!(
            serde_json::to_value(&overrides).unwrap(),
            json!({"first_name": "Ada"})
        );

        overrides.links.add_href_link("customers", "/api/v2/customers/2");
        overrides.links.add_href_link("customers", "/api/v2/customers/3");
        assert_eq!(
            serde_json::to_value(&overrides).unwrap(),
            json!({
                "first_name": "Ada",
                "_links": {"customers": [
                    {"href": "/api/v2/customers/2"},
                    {"href": "/api/v2/customers/3"}
                ]}
            })
        );
    }

    #[test]
    fn test_merge_response_job_link() {
        let response: MergeResponse = serde_json::from_value(json!({
            "_links": {"job": {"href": "/api/v2/jobs/abc123", "class": "job"}}
        }))
        .unwrap();

        let job = response.links.links("job").first().and_then(HrefLink::trailing_segment);
        assert_eq!(job, Some("abc123"));
    }
}
