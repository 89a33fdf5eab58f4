//! Journal entry types
//!
//! These are the assembled, validated entries handed to the ledger. Their
//! serde representation is the submission shape: camelCase keys, optional
//! references omitted when unresolved, amounts as JSON numbers.

use super::reference::RecordRef;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One account-level credit or debit
///
/// A line always has a resolved account. At most one of `credit` and
/// `debit` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntryLine {
    pub account: RecordRef,

    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub classification: Option<RecordRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<RecordRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<RecordRef>,

    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit: Option<Decimal>,

    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub debit: Option<Decimal>,

    pub memo: String,
}

/// One double-entry transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub created_date: Option<NaiveDate>,

    pub tran_date: Option<NaiveDate>,

    /// The group's `Journal Entry Id`
    pub external_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<RecordRef>,

    /// Debit-side subsidiary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsidiary: Option<RecordRef>,

    /// Credit-side subsidiary; never equal to `subsidiary`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_subsidiary: Option<RecordRef>,

    pub line_list: Vec<JournalEntryLine>,
}

impl JournalEntry {
    pub fn is_empty(&self) -> bool {
        self.line_list.is_empty()
    }
}

/// What the ledger answered for one posted entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    /// Always `JournalEntry` for this target
    pub entity: String,
    pub external_id: Option<String>,
    pub status: PostStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Accepted,
}

impl PostResponse {
    pub fn accepted(external_id: Option<String>) -> Self {
        PostResponse {
            entity: "JournalEntry".to_string(),
            external_id,
            status: PostStatus::Accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account() -> RecordRef {
        RecordRef {
            name: Some("Cash".to_string()),
            external_id: None,
            internal_id: "1".to_string(),
        }
    }

    #[test]
    fn test_line_serialization_omits_unset_fields() {
        let line = JournalEntryLine {
            account: account(),
            classification: None,
            department: None,
            location: None,
            credit: Some(Decimal::new(15000, 2)),
            debit: None,
            memo: "Rent".to_string(),
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "account": {"name": "Cash", "externalId": null, "internalId": "1"},
                "credit": 150.0,
                "memo": "Rent"
            })
        );
    }

    #[test]
    fn test_entry_serialization_shape() {
        let entry = JournalEntry {
            created_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            tran_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            external_id: "JE1".to_string(),
            currency: None,
            subsidiary: Some(RecordRef::from_internal_id("5")),
            to_subsidiary: None,
            line_list: vec![],
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "createdDate": "2024-01-31",
                "tranDate": "2024-01-31",
                "externalId": "JE1",
                "subsidiary": {"name": null, "externalId": null, "internalId": "5"},
                "lineList": []
            })
        );
    }

    #[test]
    fn test_line_class_key() {
        let line = JournalEntryLine {
            account: account(),
            classification: Some(RecordRef::from_internal_id("9")),
            department: None,
            location: None,
            credit: None,
            debit: Some(Decimal::new(1050, 2)),
            memo: String::new(),
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["class"]["internalId"], json!("9"));
        assert_eq!(value["debit"], json!(10.5));
    }

    #[test]
    fn test_post_response_serialization() {
        let response = PostResponse::accepted(Some("JE1".to_string()));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"entity": "JournalEntry", "externalId": "JE1", "status": "accepted"})
        );
    }
}
