//! User model and trait implementations.
//!
//! A user may double as an organization contact; the contact-specific fields
//! (title, phones, address, contact types, associated entities) are all
//! optional and only validated server-side when present.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::BizClient;
use crate::error::{BizError, Result};
use crate::models::Address;
use crate::pagination::PageQuery;
use crate::traits::{Create, Delete, Get, List, Update};
use crate::transcode;

/// A user record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// The unique user name for this user. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// The email address associated with this user. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's first name. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// The user's last name. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// When the user is also a contact, the contact title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Primary phone number. Required if the user is a contact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,

    /// The user's physical address. Required, with its required components,
    /// when the user has associated entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<Address>,

    /// Contact type codes, when this user is a contact for an organization.
    /// Valid codes come from the `ContactTypes` lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_types: Option<Vec<String>>,

    /// Entities this contact is associated with (suppliers, distributors,
    /// locations). The platform uses these to restrict visible records via
    /// the data firewall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_entities: Option<Vec<EntityReference>>,

    /// Entities accessible to the user; initializes the user's data
    /// firewall. Referenced entities must exist beforehand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible_entities: Option<Vec<EntityReference>>,

    /// Profile identifiers this user has membership in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,

    /// When creating a user, `true` sends the new-user notification email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_new_user_notification: Option<bool>,

    /// Indicates this user has complete data firewall access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_all_access: Option<bool>,

    /// Custom properties not explicitly supported by this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_information: Option<HashMap<String, String>>,

    /// Hierarchy levels configuring the user's data firewall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchies: Option<Hierarchies>,
}

impl User {
    /// Whether this user is also a contact for an organization.
    ///
    /// Users are considered a contact if any field typically associated with
    /// a contact record is present.
    pub fn is_also_contact(&self) -> bool {
        fn present(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|s| !s.is_empty())
        }

        self.associated_entities
            .as_ref()
            .is_some_and(|e| !e.is_empty())
            || self.contact_types.as_ref().is_some_and(|c| !c.is_empty())
            || present(&self.primary_phone_number)
            || present(&self.mobile_phone_number)
            || present(&self.title)
            || self
                .physical_address
                .as_ref()
                .is_some_and(|a| !a.is_empty())
    }

    /// Validate that every dictionary key in this record is a legal XML
    /// element name.
    ///
    /// The platform converts records to XML, turning dictionary keys into
    /// element names; a key the XML grammar rejects would fail server-side
    /// with a much less useful error.
    ///
    /// # Errors
    ///
    /// Returns [`BizError::InvalidKeyName`] naming every offending key.
    pub fn verify_keys_are_valid_xml_names(&self) -> Result<()> {
        let mut invalid = Vec::new();

        if let Some(extra) = &self.extra_information {
            invalid.extend(extra.keys().filter(|k| !transcode::is_valid_xml_name(k)));
        }
        if let Some(hierarchies) = &self.hierarchies {
            invalid.extend(
                hierarchies
                    .hierarchy
                    .iter()
                    .flat_map(|level| level.keys())
                    .filter(|k| !transcode::is_valid_xml_name(k)),
            );
        }

        if invalid.is_empty() {
            return Ok(());
        }

        let mut names: Vec<&str> = invalid.iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        Err(BizError::InvalidKeyName(names.join(", ")))
    }

    fn require_user_name(&self) -> Result<&str> {
        self.user_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(BizError::MissingField {
                entity_type: "User",
                field: "UserName",
            })
    }
}

/// A reference to an entity, such as a restaurant or retail location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityReference {
    /// The ID of the referenced entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The entity type name, such as `Supplier` or `Distributor`. Valid
    /// names come from the `EntityTypes` lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    /// Additional data-firewall configuration parameters. Hierarchy values
    /// must be configured in the system ahead of time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HashMap<String, String>>,
}

impl EntityReference {
    /// Reference an entity by ID and type name.
    pub fn new(id: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            entity_type: Some(entity_type.into()),
            hierarchy: None,
        }
    }
}

/// Hierarchy levels used to configure the data firewall for a [`User`].
///
/// Each level is a map of hierarchy keys to values; keys must be configured
/// in the system ahead of time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hierarchies {
    /// The hierarchy levels, outermost first.
    #[serde(default)]
    pub hierarchy: Vec<HashMap<String, String>>,
}

impl Hierarchies {
    /// Create with `levels` empty hierarchy dictionaries, so the index
    /// operators can be used immediately.
    #[must_use]
    pub fn with_levels(levels: usize) -> Self {
        Self {
            hierarchy: vec![HashMap::new(); levels],
        }
    }
}

impl Index<usize> for Hierarchies {
    type Output = HashMap<String, String>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.hierarchy[index]
    }
}

impl IndexMut<usize> for Hierarchies {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.hierarchy[index]
    }
}

/// One row of user data as returned by the `Users` list endpoint.
///
/// List rows are flattened from the underlying table; fetch the full
/// [`User`] for details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    /// The unique user name for this user.
    #[serde(default)]
    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Comma-separated list of profile IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_ids: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_number: Option<String>,
}

#[async_trait]
impl Get for User {
    type Id = String;

    async fn get(client: &BizClient, id: String) -> Result<Self> {
        client
            .get_json(&format!("Users/{}", urlencoding::encode(&id)))
            .await
    }
}

#[async_trait]
impl Create for User {
    async fn create(client: &BizClient, item: &Self) -> Result<Self> {
        item.verify_keys_are_valid_xml_names()?;
        client.post_json("Users", item).await
    }
}

#[async_trait]
impl Update for User {
    /// PUT keyed by the user's own `UserName`.
    async fn update(client: &BizClient, item: &Self) -> Result<Self> {
        item.verify_keys_are_valid_xml_names()?;
        let id = item.require_user_name()?;
        client
            .put_json(&format!("Users/{}", urlencoding::encode(id)), item)
            .await
    }
}

#[async_trait]
impl Delete for User {
    type Id = String;

    async fn delete(client: &BizClient, id: String) -> Result<()> {
        client
            .delete(&format!("Users/{}", urlencoding::encode(&id)))
            .await
    }
}

#[async_trait]
impl List for UserSummary {
    async fn list_page(client: &BizClient, query: &PageQuery) -> Result<Vec<Self>> {
        client.get_json_with_query("Users", query).await
    }
}
