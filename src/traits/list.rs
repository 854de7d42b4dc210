//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::BizClient;
use crate::error::Result;
use crate::pagination::{self, PageQuery, DEFAULT_PAGE_SIZE};

/// List entities with pagination support.
///
/// Implement this trait for the row types list endpoints actually return —
/// typically flattened summary records, not the full DTOs.
///
/// # Example
///
/// ```ignore
/// use bizapi::{BizClient, List, models::UserSummary};
///
/// let client = BizClient::from_env()?;
///
/// // Fetch a single page
/// let page = UserSummary::list_page(&client, &PageQuery::new(0, 50)).await?;
///
/// // Fetch everything, filtering client-side
/// let admins = UserSummary::list_all_filtered(&client, |u| {
///     u.user_name.starts_with("admin.")
/// }).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// List one page of entities.
    ///
    /// The server caps pages at 200 rows; a `pageSize` of `-1` requests the
    /// server default.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>>;

    /// List all entities, fetching pages until a short page is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &BizClient) -> Result<Vec<Self>> {
        Self::list_all_filtered(client, pagination::accept_all).await
    }

    /// List all entities matching a client-side filter.
    ///
    /// Pages through every record regardless of the filter; the filter only
    /// trims what is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all_filtered<P>(client: &BizClient, filter: P) -> Result<Vec<Self>>
    where
        P: Fn(&Self) -> bool + Send + Sync + 'async_trait,
    {
        pagination::list_all(
            DEFAULT_PAGE_SIZE,
            |page_index| async move {
                let query = PageQuery::new(page_index, DEFAULT_PAGE_SIZE as i32);
                Self::list_page(client, &query).await
            },
            filter,
        )
        .await
    }
}
