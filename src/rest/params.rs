use serde::{Deserialize, Serialize};

/// Sort order for list and search operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Pagination, sorting and embedding parameters shared by every collection.
///
/// # Example
///
/// ```rust
/// use desk_api::rest::{PageParams, SortDirection};
///
/// let params = PageParams {
///     per_page: Some(100),
///     sort_field: Some("created_at".to_string()),
///     sort_direction: Some(SortDirection::Desc),
///     ..PageParams::default()
/// };
/// assert_eq!(params.page, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Entries per page (Desk caps this at 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Comma-separated relations to embed, e.g. `customer,assigned_user`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
    /// Comma-separated fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
