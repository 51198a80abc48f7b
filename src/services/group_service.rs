use crate::rest::{Page, PageParams, Resource, ResourceError};
use crate::resources::{Group, User};
use crate::services::{unraveled, DeskClient};

/// Operations on `/groups`.
#[derive(Debug, Clone, Copy)]
pub struct GroupService<'a> {
    client: &'a DeskClient,
}

impl<'a> GroupService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves a group (`GET /groups/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<Group, ResourceError> {
        Group::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists groups (`GET /groups`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<Group>, ResourceError> {
        let page = Group::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Lists the group's members (`GET /groups/{id}/users`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn users(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<User>, ResourceError> {
        let page = Group::list_nested::<User>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }
}
