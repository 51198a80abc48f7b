use crate::rest::{Page, PageParams, Resource, ResourceError};
use crate::resources::{Case, Company, CompanySearchParams, Customer};
use crate::services::{unraveled, DeskClient};

/// Operations on `/companies`.
#[derive(Debug, Clone, Copy)]
pub struct CompanyService<'a> {
    client: &'a DeskClient,
}

impl<'a> CompanyService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves a company (`GET /companies/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<Company, ResourceError> {
        Company::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists companies (`GET /companies`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<Company>, ResourceError> {
        let page = Company::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Searches companies (`GET /companies/search`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn search(
        &self,
        params: CompanySearchParams,
    ) -> Result<Page<Company>, ResourceError> {
        let page = Company::search(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Creates a company (`POST /companies`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(&self, company: &Company) -> Result<Company, ResourceError> {
        company.create(self.client.http(), self.client.cancel_token()).await
    }

    /// Updates a company (`PATCH /companies/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the company has no
    /// `self` link, or another [`ResourceError`] if the request fails.
    pub async fn update(&self, company: &Company) -> Result<Company, ResourceError> {
        company.update(self.client.http(), self.client.cancel_token()).await
    }

    /// Lists the company's cases (`GET /companies/{id}/cases`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn cases(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<Case>, ResourceError> {
        let page = Company::list_nested::<Case>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }

    /// Lists the company's customers (`GET /companies/{id}/customers`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn customers(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<Customer>, ResourceError> {
        let page = Company::list_nested::<Customer>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }
}
