use crate::rest::{Page, PageParams, Resource, ResourceError};
use crate::resources::Job;
use crate::services::{unraveled, DeskClient};

/// Operations on `/jobs`.
#[derive(Debug, Clone, Copy)]
pub struct JobService<'a> {
    client: &'a DeskClient,
}

impl<'a> JobService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves a job (`GET /jobs/{id}`), e.g. the id returned by a merge.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<Job, ResourceError> {
        Job::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists jobs (`GET /jobs`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<Job>, ResourceError> {
        let page = Job::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }
}
