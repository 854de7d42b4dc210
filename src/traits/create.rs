//! Create trait for inserting new entities.

use async_trait::async_trait;

use crate::client::BizClient;
use crate::error::Result;

/// Insert a new entity via POST.
///
/// The server echoes the stored record back, so `create` returns a fresh
/// instance rather than mutating the argument.
///
/// # Example
///
/// ```ignore
/// use bizapi::{BizClient, Create, models::Asset};
///
/// let client = BizClient::from_env()?;
/// let created = Asset::create(&client, &asset).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Insert the entity and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the record (missing required
    /// fields answer 400 with a "... not provided" message) or the request
    /// fails.
    async fn create(client: &BizClient, item: &Self) -> Result<Self>;
}
