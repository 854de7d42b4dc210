//! Read-only lookup tables.
//!
//! Small reference resources (`Countries`, `States`, `Profiles`,
//! `EntityTypes`, `Concepts`, `ContactTypes`) that only support listing.
//! Their values parameterize the writable records: country/state codes in
//! addresses, profile IDs on users, concept IDs on locations, and so on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::BizClient;
use crate::error::Result;
use crate::pagination::PageQuery;
use crate::traits::List;

/// A country lookup row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryInfo {
    /// The ISO 3166-1 alpha-2 country code, e.g. `US`.
    #[serde(default)]
    pub country_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
}

/// A state/province lookup row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateInfo {
    /// The ISO 3166-1 alpha-2 code of the country this state belongs to.
    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub state_province_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province_name: Option<String>,
}

/// A profile lookup row. Profile IDs grant users membership in profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileInfo {
    #[serde(default)]
    pub profile_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_name: Option<String>,
}

/// An entity type lookup row, referenced by
/// [`EntityReference`](crate::models::EntityReference).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityTypeInfo {
    #[serde(default)]
    pub entity_type_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type_name: Option<String>,
}

/// A concept lookup row, referenced by location `Concepts` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConceptInfo {
    #[serde(default)]
    pub concept_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_name: Option<String>,
}

/// A contact type lookup row, referenced by user `ContactTypes` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactType {
    #[serde(default)]
    pub contact_type_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type_name: Option<String>,
}

#[async_trait]
impl List for CountryInfo {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Countries", query).await
    }
}

#[async_trait]
impl List for StateInfo {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("States", query).await
    }
}

#[async_trait]
impl List for ProfileInfo {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Profiles", query).await
    }
}

#[async_trait]
impl List for EntityTypeInfo {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("EntityTypes", query).await
    }
}

#[async_trait]
impl List for ConceptInfo {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Concepts", query).await
    }
}

#[async_trait]
impl List for ContactType {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("ContactTypes", query).await
    }
}

/// List the states belonging to one country.
///
/// The server has no states-by-country endpoint; this lists states and
/// filters client-side.
///
/// # Errors
///
/// Returns an error if the underlying list request fails.
pub async fn list_states_by_country(
    client: &BizClient,
    country_code: &str,
) -> Result<Vec<StateInfo>> {
    StateInfo::list_all_filtered(client, |state| state.country_code == country_code).await
}
