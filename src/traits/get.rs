//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::BizClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually by
/// a unique identifier (a user name, asset ID, location ID and so on).
///
/// # Example
///
/// ```ignore
/// use bizapi::{BizClient, Get, models::User};
///
/// let client = BizClient::from_env()?;
/// let user = User::get(&client, "jane.doe".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &BizClient, id: Self::Id) -> Result<Self>;
}
