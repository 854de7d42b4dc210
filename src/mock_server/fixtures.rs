//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::Value;

use crate::models::{
    Address, Asset, ConceptInfo, ContactType, CountryInfo, EntityReference, EntityTypeInfo,
    ProfileInfo, Restaurant, RetailLocation, StateInfo, User,
};

use super::state::ObjectRow;

/// The data a default mock server starts with.
pub struct DefaultScenario {
    pub users: Vec<User>,
    pub assets: Vec<Asset>,
    pub retail_locations: Vec<RetailLocation>,
    pub restaurants: Vec<Restaurant>,
    pub countries: Vec<CountryInfo>,
    pub states: Vec<StateInfo>,
    pub profiles: Vec<ProfileInfo>,
    pub entity_types: Vec<EntityTypeInfo>,
    pub concepts: Vec<ConceptInfo>,
    pub contact_types: Vec<ContactType>,
}

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // User fixtures
    // =========================================================================

    /// Create a minimal user with the required fields only.
    pub fn minimal_user(user_name: &str) -> User {
        User {
            user_name: Some(user_name.to_string()),
            email: Some(format!("{user_name}@example.com")),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            ..Default::default()
        }
    }

    /// Create a user that is also a contact for a location.
    pub fn contact_user(user_name: &str, location_id: &str) -> User {
        let mut user = Self::minimal_user(user_name);
        user.title = Some("Manager".to_string());
        user.primary_phone_number = Some("555-1212".to_string());
        user.physical_address = Some(Self::address());
        user.contact_types = Some(vec!["MGR".to_string(), "ALT".to_string()]);
        user.associated_entities = Some(vec![EntityReference::new(location_id, "Retail_Location")]);
        user
    }

    /// A populated postal address.
    pub fn address() -> Address {
        Address {
            address1: Some("123 Main St".to_string()),
            city: Some("San Diego".to_string()),
            state_province_code: Some("CA".to_string()),
            zip_code: Some("92101".to_string()),
            country_code: Some("US".to_string()),
            ..Default::default()
        }
    }

    // =========================================================================
    // Asset fixtures
    // =========================================================================

    /// Create a minimal asset with the required fields only.
    pub fn minimal_asset(id: &str) -> Asset {
        Asset {
            id: Some(id.to_string()),
            asset_type: Some("Equipment".to_string()),
            ..Default::default()
        }
    }

    /// Create `count` assets with sequential IDs (`ASSET-0001`, ...).
    ///
    /// Useful for pagination tests that need a data set of a known size.
    pub fn assets(count: usize) -> Vec<Asset> {
        (1..=count)
            .map(|i| {
                let mut asset = Self::minimal_asset(&format!("ASSET-{i:04}"));
                asset.sub_type = Some(if i % 2 == 0 { "Fryer" } else { "Oven" }.to_string());
                asset
            })
            .collect()
    }

    // =========================================================================
    // Location fixtures
    // =========================================================================

    /// Create a retail location with its required fields populated.
    pub fn retail_location(id: &str, name: &str) -> RetailLocation {
        RetailLocation {
            id: Some(id.to_string()),
            location_name: Some(name.to_string()),
            physical_address: Some(Self::address()),
            concepts: Some(vec!["GROCERY".to_string(), "PHARMACY".to_string()]),
            ..Default::default()
        }
    }

    /// Create a restaurant with its required fields populated.
    pub fn restaurant(id: &str, name: &str) -> Restaurant {
        Restaurant {
            id: Some(id.to_string()),
            location_name: Some(name.to_string()),
            physical_address: Some(Self::address()),
            concepts: Some(vec!["PIZZA".to_string(), "WINGS".to_string()]),
            ..Default::default()
        }
    }

    // =========================================================================
    // Object rows
    // =========================================================================

    /// Create `count` object rows with sequential store IDs and a `Country`
    /// property cycling through US/CA/GB.
    pub fn object_rows(count: usize) -> Vec<ObjectRow> {
        let countries = ["US", "CA", "GB"];
        (1..=count)
            .map(|i| {
                let mut row = ObjectRow::new();
                row.insert("_StoreId".to_string(), Value::String(format!("{}", 100 + i)));
                row.insert(
                    "Country".to_string(),
                    Value::String(countries[i % countries.len()].to_string()),
                );
                row
            })
            .collect()
    }

    // =========================================================================
    // Scenario
    // =========================================================================

    /// The default data a freshly started mock server serves.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            users: vec![
                Self::minimal_user("jane.doe"),
                Self::contact_user("john.roe", "STORE-001"),
            ],
            assets: vec![Self::minimal_asset("FRYER-001"), Self::minimal_asset("OVEN-001")],
            retail_locations: vec![Self::retail_location("STORE-001", "Downtown Market")],
            restaurants: vec![Self::restaurant("REST-001", "Harbor Grill")],
            countries: vec![
                CountryInfo {
                    country_code: "US".to_string(),
                    country_name: Some("United States of America".to_string()),
                },
                CountryInfo {
                    country_code: "CA".to_string(),
                    country_name: Some("Canada".to_string()),
                },
                CountryInfo {
                    country_code: "GB".to_string(),
                    country_name: Some("United Kingdom".to_string()),
                },
            ],
            states: vec![
                StateInfo {
                    country_code: "US".to_string(),
                    state_province_code: "CA".to_string(),
                    state_province_name: Some("California".to_string()),
                },
                StateInfo {
                    country_code: "US".to_string(),
                    state_province_code: "NY".to_string(),
                    state_province_name: Some("New York".to_string()),
                },
                StateInfo {
                    country_code: "CA".to_string(),
                    state_province_code: "ON".to_string(),
                    state_province_name: Some("Ontario".to_string()),
                },
            ],
            profiles: vec![
                ProfileInfo {
                    profile_id: "ADMIN".to_string(),
                    profile_name: Some("Administrators".to_string()),
                },
                ProfileInfo {
                    profile_id: "AUDITOR".to_string(),
                    profile_name: Some("Auditors".to_string()),
                },
            ],
            entity_types: vec![
                EntityTypeInfo {
                    entity_type_id: "1".to_string(),
                    entity_type_name: Some("Retail_Location".to_string()),
                },
                EntityTypeInfo {
                    entity_type_id: "2".to_string(),
                    entity_type_name: Some("Supplier".to_string()),
                },
            ],
            concepts: vec![
                ConceptInfo {
                    concept_id: "GROCERY".to_string(),
                    concept_name: Some("Grocery".to_string()),
                },
                ConceptInfo {
                    concept_id: "PIZZA".to_string(),
                    concept_name: Some("Pizza".to_string()),
                },
            ],
            contact_types: vec![
                ContactType {
                    contact_type_code: "MGR".to_string(),
                    contact_type_name: Some("Manager".to_string()),
                },
                ContactType {
                    contact_type_code: "ALT".to_string(),
                    contact_type_name: Some("Alternate".to_string()),
                },
            ],
        }
    }
}
