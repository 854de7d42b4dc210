//! Asset model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::BizClient;
use crate::error::{BizError, Result};
use crate::pagination::PageQuery;
use crate::traits::{Create, Delete, Get, List, Update};

/// An asset record (a piece of tracked equipment).
///
/// Unlike the other record types, the `Assets` list endpoint returns full
/// asset records, so [`Asset`] implements [`List`] directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    /// The unique asset ID. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The asset type. Required.
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,

    /// The asset subtype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,

    /// The asset description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Custom properties not explicitly supported by this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_information: Option<HashMap<String, String>>,
}

impl Asset {
    fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BizError::MissingField {
                entity_type: "Asset",
                field: "Id",
            })
    }
}

#[async_trait]
impl Get for Asset {
    type Id = String;

    async fn get(client: &BizClient, id: String) -> Result<Self> {
        client
            .get_json(&format!("Assets/{}", urlencoding::encode(&id)))
            .await
    }
}

#[async_trait]
impl List for Asset {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Assets", query).await
    }
}

#[async_trait]
impl Create for Asset {
    async fn create(client: &BizClient, item: &Self) -> Result<Self> {
        client.post_json("Assets", item).await
    }
}

#[async_trait]
impl Update for Asset {
    async fn update(client: &BizClient, item: &Self) -> Result<Self> {
        let id = item.require_id()?;
        client
            .put_json(&format!("Assets/{}", urlencoding::encode(id)), item)
            .await
    }
}

#[async_trait]
impl Delete for Asset {
    type Id = String;

    async fn delete(client: &BizClient, id: String) -> Result<()> {
        client
            .delete(&format!("Assets/{}", urlencoding::encode(&id)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_name() {
        let asset = Asset {
            id: Some("FRYER-001".to_string()),
            asset_type: Some("Equipment".to_string()),
            sub_type: Some("Fryer".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Id": "FRYER-001",
                "Type": "Equipment",
                "SubType": "Fryer",
            })
        );
    }

    #[test]
    fn test_update_without_id_is_rejected_client_side() {
        let asset = Asset::default();
        assert!(asset.require_id().is_err());

        let blank = Asset {
            id: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.require_id().is_err());
    }
}
