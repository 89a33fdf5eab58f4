//! Reference data types
//!
//! Two families live here:
//! - the *fetched* shapes ([`ReferenceRecord`], [`AccountRecord`],
//!   [`CurrencyRecord`]) as the ledger returns them, with every field optional
//! - the *resolved* [`RecordRef`], the `{name, externalId, internalId}` triple
//!   that ends up in a submitted journal entry
//!
//! A fetched record is only usable once it has an internal id; the `to_ref`
//! conversions return `None` otherwise.

use serde::{Deserialize, Deserializer, Serialize};

/// Pointer to a ledger entity inside a submitted journal entry
///
/// `name` and `externalId` are serialized as `null` when unknown; the triple
/// is always emitted in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRef {
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub internal_id: String,
}

impl RecordRef {
    /// Reference known only by its internal id
    pub fn from_internal_id(internal_id: impl Into<String>) -> Self {
        RecordRef {
            name: None,
            external_id: None,
            internal_id: internal_id.into(),
        }
    }
}

/// Named ledger entity (classification, department, location, subsidiary)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub internal_id: Option<String>,
}

impl ReferenceRecord {
    pub fn to_ref(&self) -> Option<RecordRef> {
        Some(RecordRef {
            name: self.name.clone(),
            external_id: self.external_id.clone(),
            internal_id: self.internal_id.clone()?,
        })
    }
}

/// Ledger account as fetched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub acct_number: Option<String>,
    #[serde(default)]
    pub acct_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub internal_id: Option<String>,
    /// Subsidiaries the account belongs to; the first one is its default
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subsidiary_list: Vec<ReferenceRecord>,
}

impl AccountRecord {
    pub fn to_ref(&self) -> Option<RecordRef> {
        Some(RecordRef {
            name: self.acct_name.clone(),
            external_id: self.external_id.clone(),
            internal_id: self.internal_id.clone()?,
        })
    }

    /// First usable entry of the subsidiary list
    pub fn default_subsidiary(&self) -> Option<RecordRef> {
        self.subsidiary_list.first().and_then(ReferenceRecord::to_ref)
    }
}

/// Currency as fetched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub internal_id: Option<String>,
}

impl CurrencyRecord {
    /// The emitted reference is named by the currency symbol
    pub fn to_ref(&self) -> Option<RecordRef> {
        Some(RecordRef {
            name: self.symbol.clone(),
            external_id: self.external_id.clone(),
            internal_id: self.internal_id.clone()?,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

// Ledger exports are inconsistent about quoting ids and account numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReferenceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ReferenceRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_record_deserializes_numbers_as_strings() {
        let account: AccountRecord = serde_json::from_value(json!({
            "acctNumber": 100,
            "acctName": "Cash",
            "internalId": 7,
            "subsidiaryList": [{"name": "US", "internalId": "1"}]
        }))
        .unwrap();

        assert_eq!(account.acct_number.as_deref(), Some("100"));
        assert_eq!(account.internal_id.as_deref(), Some("7"));
        assert_eq!(account.external_id, None);
        assert_eq!(
            account.default_subsidiary(),
            Some(RecordRef {
                name: Some("US".to_string()),
                external_id: None,
                internal_id: "1".to_string(),
            })
        );
    }

    #[test]
    fn test_account_record_null_subsidiary_list() {
        let account: AccountRecord = serde_json::from_value(json!({
            "acctNumber": "200",
            "internalId": "8",
            "subsidiaryList": null
        }))
        .unwrap();

        assert!(account.subsidiary_list.is_empty());
        assert_eq!(account.default_subsidiary(), None);
    }

    #[test]
    fn test_to_ref_requires_internal_id() {
        let record = ReferenceRecord {
            name: Some("Sales".to_string()),
            external_id: Some("ext-1".to_string()),
            internal_id: None,
        };
        assert_eq!(record.to_ref(), None);
    }

    #[test]
    fn test_currency_ref_is_named_by_symbol() {
        let currency = CurrencyRecord {
            symbol: Some("USD".to_string()),
            name: Some("US Dollar".to_string()),
            external_id: None,
            internal_id: Some("1".to_string()),
        };
        assert_eq!(currency.to_ref().unwrap().name.as_deref(), Some("USD"));
    }

    #[test]
    fn test_record_ref_serializes_full_triple() {
        let value = serde_json::to_value(RecordRef::from_internal_id("5")).unwrap();
        assert_eq!(
            value,
            json!({"name": null, "externalId": null, "internalId": "5"})
        );
    }
}
