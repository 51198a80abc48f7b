use crate::rest::{Page, PageParams, Resource, ResourceError};
use crate::resources::{Case, CaseEvent, CaseSearchParams, Reply};
use crate::services::{unraveled, DeskClient};

/// Operations on `/cases`.
#[derive(Debug, Clone, Copy)]
pub struct CaseService<'a> {
    client: &'a DeskClient,
}

impl<'a> CaseService<'a> {
    pub(crate) const fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// Retrieves a case (`GET /cases/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the id is empty or the request fails.
    pub async fn get(&self, id: &str) -> Result<Case, ResourceError> {
        Case::find(self.client.http(), id, self.client.cancel_token()).await
    }

    /// Lists cases (`GET /cases`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn list(&self, params: Option<PageParams>) -> Result<Page<Case>, ResourceError> {
        let page = Case::list(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Searches cases (`GET /cases/search`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn search(&self, params: CaseSearchParams) -> Result<Page<Case>, ResourceError> {
        let page = Case::search(self.client.http(), params, self.client.cancel_token()).await?;
        unraveled(page)
    }

    /// Creates a case (`POST /cases`). Desk requires `message` on create.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn create(&self, case: &Case) -> Result<Case, ResourceError> {
        case.create(self.client.http(), self.client.cancel_token()).await
    }

    /// Updates a case (`PATCH /cases/{id}`), addressed by its `self` link.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the case has no `self`
    /// link, or another [`ResourceError`] if the request fails.
    pub async fn update(&self, case: &Case) -> Result<Case, ResourceError> {
        case.update(self.client.http(), self.client.cancel_token()).await
    }

    /// Lists a case's history (`GET /cases/{id}/case_events`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn events(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<CaseEvent>, ResourceError> {
        let page = Case::list_nested::<CaseEvent>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }

    /// Lists a case's replies (`GET /cases/{id}/replies`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request or unraveling fails.
    pub async fn replies(
        &self,
        id: &str,
        params: Option<PageParams>,
    ) -> Result<Page<Reply>, ResourceError> {
        let page = Case::list_nested::<Reply>(
            self.client.http(),
            id,
            params,
            self.client.cancel_token(),
        )
        .await?;
        unraveled(page)
    }

    /// Retrieves one reply (`GET /cases/{id}/replies/{reply_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if either id is empty or the request fails.
    pub async fn reply(&self, id: &str, reply_id: &str) -> Result<Reply, ResourceError> {
        Case::find_nested::<Reply>(self.client.http(), id, reply_id, self.client.cancel_token())
            .await
    }

    /// Updates a reply at the path of its `self` link
    /// (`PATCH /cases/{id}/replies/{reply_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingIdentity`] if the reply has no `self`
    /// link, or another [`ResourceError`] if the request fails.
    pub async fn update_reply(&self, reply: &Reply) -> Result<Reply, ResourceError> {
        reply.update(self.client.http(), self.client.cancel_token()).await
    }
}
