//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::BizClient;
use crate::error::Result;

/// Update an existing entity via PUT.
///
/// The record carries its own identifier (a user's user name, a location's
/// ID), which the implementation uses as the resource ID in the path.
///
/// # Example
///
/// ```ignore
/// use bizapi::{BizClient, Get, Update, models::User};
///
/// let client = BizClient::from_env()?;
/// let mut user = User::get(&client, "jane.doe".to_string()).await?;
/// user.title = Some("Director".to_string());
/// let updated = User::update(&client, &user).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// Update the entity and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &BizClient, item: &Self) -> Result<Self>;
}
