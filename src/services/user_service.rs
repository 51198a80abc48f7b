use crate::rest::{Page, PageParams, Resource, ResourceError};
use crate::resources::User;
use crate::services::{unraveled, DeskClient};

/// Operations on `/users`.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a DeskClient,
}

impl<'a> UserService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves an agent (`GET /users/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<User, ResourceError> {
        User::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists agents (`GET /users`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<User>, ResourceError> {
        let page = User::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }
}
