//! Restaurant model and trait implementations.
//!
//! Restaurants and retail locations share the same shape; they are distinct
//! record types (and resources) in the platform, not variants of one.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::BizClient;
use crate::error::{BizError, Result};
use crate::models::Address;
use crate::pagination::PageQuery;
use crate::traits::{Create, Delete, Get, List, Update};

/// A restaurant record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Restaurant {
    /// The unique location ID. Required, and unique across all organization
    /// locations (retail locations included).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The location name. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,

    /// Physical address of the restaurant. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<Address>,

    /// Optional mailing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<Address>,

    /// Concept IDs associated with this restaurant; valid IDs come from the
    /// `Concepts` lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Vec<String>>,

    /// Custom properties not explicitly supported by this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_information: Option<HashMap<String, String>>,
}

impl Restaurant {
    fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BizError::MissingField {
                entity_type: "Restaurant",
                field: "Id",
            })
    }
}

/// One row of restaurant data as returned by the `Restaurants` list
/// endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestaurantSummary {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    /// Comma-separated list of concept IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_ids: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_zip_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_address2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_zip_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailing_country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_information: Option<HashMap<String, String>>,
}

#[async_trait]
impl Get for Restaurant {
    type Id = String;

    async fn get(client: &BizClient, id: String) -> Result<Self> {
        client
            .get_json(&format!("Restaurants/{}", urlencoding::encode(&id)))
            .await
    }
}

#[async_trait]
impl Create for Restaurant {
    async fn create(client: &BizClient, item: &Self) -> Result<Self> {
        client.post_json("Restaurants", item).await
    }
}

#[async_trait]
impl Update for Restaurant {
    async fn update(client: &BizClient, item: &Self) -> Result<Self> {
        let id = item.require_id()?;
        client
            .put_json(&format!("Restaurants/{}", urlencoding::encode(id)), item)
            .await
    }
}

#[async_trait]
impl Delete for Restaurant {
    type Id = String;

    async fn delete(client: &BizClient, id: String) -> Result<()> {
        client
            .delete(&format!("Restaurants/{}", urlencoding::encode(&id)))
            .await
    }
}

#[async_trait]
impl List for RestaurantSummary {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Restaurants", query).await
    }
}
