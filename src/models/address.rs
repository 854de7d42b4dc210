//! Address record shared by users and locations.

use serde::{Deserialize, Serialize};

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Address line 1. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,

    /// Optional address line 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,

    /// Optional address line 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,

    /// The city name. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// The 2 or 3 character state code, or full state/province name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    /// The ISO 3166-1 alpha-2 country code, e.g. `US`. Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl Address {
    /// Whether every component of the address is absent or blank.
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, str::is_empty)
        }

        blank(&self.address1)
            && blank(&self.address2)
            && blank(&self.address3)
            && blank(&self.city)
            && blank(&self.state_province_code)
            && blank(&self.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(Address::default().is_empty());

        let blank = Address {
            address1: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.is_empty());

        let populated = Address {
            address1: Some("123 Main St".to_string()),
            ..Default::default()
        };
        assert!(!populated.is_empty());
    }

    #[test]
    fn test_wire_names_and_null_omission() {
        let address = Address {
            address1: Some("123 Main St".to_string()),
            city: Some("San Diego".to_string()),
            state_province_code: Some("CA".to_string()),
            zip_code: Some("92101".to_string()),
            country_code: Some("US".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Address1": "123 Main St",
                "City": "San Diego",
                "StateProvinceCode": "CA",
                "ZipCode": "92101",
                "CountryCode": "US",
            })
        );
    }
}
