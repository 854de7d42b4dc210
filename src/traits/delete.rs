//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::BizClient;
use crate::error::Result;

/// Delete an entity by ID.
///
/// Deletes answer `204 No Content`; the client forces connection closure on
/// DELETE requests so the empty response cannot poison a kept-alive
/// connection.
///
/// # Example
///
/// ```ignore
/// use bizapi::{BizClient, Delete, models::Asset};
///
/// let client = BizClient::from_env()?;
/// Asset::delete(&client, "FRYER-001".to_string()).await?;
/// ```
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id;

    /// Delete the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn delete(client: &BizClient, id: Self::Id) -> Result<()>;
}
