//! CSV format handling for journal entry rows
//!
//! This module centralizes all CSV format concerns, providing:
//! - Column name constants and the required column set
//! - Header validation (the schema check that runs before any processing)
//! - CsvRow structure for deserialization
//! - Conversion from CSV rows to [`RawRow`]
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{PostingType, RawRow, TargetError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Name of the input file inside the configured input directory
pub const JOURNAL_ENTRIES_FILE: &str = "JournalEntries.csv";

pub const TRANSACTION_DATE: &str = "Transaction Date";
pub const JOURNAL_ENTRY_ID: &str = "Journal Entry Id";
pub const CUSTOMER_NAME: &str = "Customer Name";
pub const CLASS: &str = "Class";
pub const ACCOUNT_NUMBER: &str = "Account Number";
pub const ACCOUNT_NAME: &str = "Account Name";
pub const POSTING_TYPE: &str = "Posting Type";
pub const DESCRIPTION: &str = "Description";

/// Columns every input file must carry
pub const REQUIRED_COLUMNS: [&str; 8] = [
    TRANSACTION_DATE,
    JOURNAL_ENTRY_ID,
    CUSTOMER_NAME,
    CLASS,
    ACCOUNT_NUMBER,
    ACCOUNT_NAME,
    POSTING_TYPE,
    DESCRIPTION,
];

/// Check the input header against [`REQUIRED_COLUMNS`]
///
/// # Returns
///
/// * `Ok(())` if every required column is present (extra columns are fine)
/// * `Err(TargetError::MissingColumns)` listing found and required columns
pub fn validate_columns(found: &[String]) -> Result<(), TargetError> {
    let complete = REQUIRED_COLUMNS
        .iter()
        .all(|required| found.iter().any(|column| column == required));

    if complete {
        Ok(())
    } else {
        Err(TargetError::missing_columns(found, &REQUIRED_COLUMNS))
    }
}

/// CSV row structure for deserialization
///
/// Every field is optional: columns outside the required set may be absent
/// from the file, and blank cells deserialize to `None`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct CsvRow {
    #[serde(rename = "Transaction Date")]
    pub transaction_date: Option<String>,
    #[serde(rename = "Journal Entry Id")]
    pub journal_entry_id: Option<String>,
    #[serde(rename = "Customer Name")]
    pub customer_name: Option<String>,
    #[serde(rename = "Class")]
    pub class: Option<String>,
    #[serde(rename = "Account Number")]
    pub account_number: Option<String>,
    #[serde(rename = "Account Name")]
    pub account_name: Option<String>,
    #[serde(rename = "Posting Type")]
    pub posting_type: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<String>,
    #[serde(rename = "Subsidiary")]
    pub subsidiary: Option<String>,
    #[serde(rename = "Department")]
    pub department: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

/// Convert a CsvRow to a RawRow
///
/// This function:
/// - Drops cells that are empty after trimming
/// - Parses the amount string into a Decimal (if present)
/// - Parses the posting type
///
/// A blank `Journal Entry Id` is kept as the empty id so the row still lands
/// in exactly one group.
///
/// # Arguments
///
/// * `csv_row` - The deserialized CSV row
/// * `line` - Line number of the row in the source file
pub fn convert_csv_row(csv_row: CsvRow, line: u64) -> Result<RawRow, TargetError> {
    let amount = match non_blank(csv_row.amount) {
        Some(amount_str) => Some(
            Decimal::from_str(&amount_str)
                .or_else(|_| Decimal::from_scientific(&amount_str))
                .map_err(|_| TargetError::invalid_amount(&amount_str, line))?,
        ),
        None => None,
    };

    let posting_type = PostingType::parse(
        non_blank(csv_row.posting_type)
            .as_deref()
            .unwrap_or_default(),
    );

    Ok(RawRow {
        line,
        journal_entry_id: non_blank(csv_row.journal_entry_id).unwrap_or_default(),
        transaction_date: non_blank(csv_row.transaction_date),
        customer_name: non_blank(csv_row.customer_name),
        class: non_blank(csv_row.class),
        account_number: non_blank(csv_row.account_number),
        account_name: non_blank(csv_row.account_name),
        posting_type,
        amount,
        subsidiary: non_blank(csv_row.subsidiary),
        department: non_blank(csv_row.department),
        location: non_blank(csv_row.location),
        currency: non_blank(csv_row.currency),
        description: non_blank(csv_row.description),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn headers(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    fn csv_row() -> CsvRow {
        CsvRow {
            transaction_date: Some("2024-01-31".to_string()),
            journal_entry_id: Some("JE1".to_string()),
            class: Some("Sales".to_string()),
            account_number: Some("100".to_string()),
            posting_type: Some("Credit".to_string()),
            amount: Some("150.004".to_string()),
            description: Some("Rent".to_string()),
            ..CsvRow::default()
        }
    }

    #[test]
    fn test_validate_columns_accepts_required_set() {
        let mut found = headers(&REQUIRED_COLUMNS);
        found.push("Amount".to_string());
        assert!(validate_columns(&found).is_ok());
    }

    #[test]
    fn test_validate_columns_accepts_any_order() {
        let mut found = headers(&REQUIRED_COLUMNS);
        found.reverse();
        assert!(validate_columns(&found).is_ok());
    }

    #[rstest]
    #[case::missing_description(DESCRIPTION)]
    #[case::missing_journal_entry_id(JOURNAL_ENTRY_ID)]
    #[case::missing_posting_type(POSTING_TYPE)]
    fn test_validate_columns_reports_missing(#[case] missing: &str) {
        let found: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| **c != missing)
            .map(|c| c.to_string())
            .collect();

        let error = validate_columns(&found).unwrap_err();
        match error {
            TargetError::MissingColumns {
                found: reported,
                required,
            } => {
                assert_eq!(reported, found);
                assert_eq!(required, headers(&REQUIRED_COLUMNS));
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_csv_row_valid() {
        let row = convert_csv_row(csv_row(), 2).unwrap();

        assert_eq!(row.line, 2);
        assert_eq!(row.journal_entry_id, "JE1");
        assert_eq!(row.posting_type, PostingType::Credit);
        assert_eq!(row.amount, Some(Decimal::new(150004, 3)));
        assert_eq!(row.account_number.as_deref(), Some("100"));
        assert_eq!(row.currency, None);
    }

    #[rstest]
    #[case::whitespace("  12.50  ", Decimal::new(1250, 2))]
    #[case::negative("-3", Decimal::new(-3, 0))]
    #[case::scientific("1.5e2", Decimal::new(150, 0))]
    fn test_convert_csv_row_amount_parsing(#[case] amount: &str, #[case] expected: Decimal) {
        let row = convert_csv_row(
            CsvRow {
                amount: Some(amount.to_string()),
                ..csv_row()
            },
            2,
        )
        .unwrap();
        assert_eq!(row.amount, Some(expected));
    }

    #[test]
    fn test_convert_csv_row_invalid_amount() {
        let result = convert_csv_row(
            CsvRow {
                amount: Some("twelve".to_string()),
                ..csv_row()
            },
            7,
        );
        assert_eq!(result, Err(TargetError::invalid_amount("twelve", 7)));
    }

    #[rstest]
    #[case::blank_optional(CsvRow { location: Some("   ".to_string()), ..csv_row() })]
    #[case::missing_optional(CsvRow { location: None, ..csv_row() })]
    fn test_convert_csv_row_blank_cells_are_absent(#[case] csv_row: CsvRow) {
        let row = convert_csv_row(csv_row, 2).unwrap();
        assert_eq!(row.location, None);
    }

    #[test]
    fn test_convert_csv_row_unknown_posting_type() {
        let row = convert_csv_row(
            CsvRow {
                posting_type: Some("Memo".to_string()),
                ..csv_row()
            },
            2,
        )
        .unwrap();
        assert_eq!(row.posting_type, PostingType::Other("Memo".to_string()));
    }
}
