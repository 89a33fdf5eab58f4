//! Input row types
//!
//! A [`RawRow`] is one accounting line as read from `JournalEntries.csv`.
//! Rows are immutable once read; grouping and assembly only borrow them.

use rust_decimal::Decimal;
use std::fmt;

/// Journal entry identifier as it appears in the `Journal Entry Id` column
pub type JournalEntryId = String;

/// Whether a row's amount lands on the credit or the debit side
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostingType {
    /// Amount goes to the line's `credit`; a derived subsidiary is the `toSubsidiary`
    Credit,

    /// Amount goes to the line's `debit`; a derived subsidiary is the `subsidiary`
    Debit,

    /// Any other value, kept verbatim
    ///
    /// Lines built from these rows carry neither a credit nor a debit.
    Other(String),
}

impl PostingType {
    /// Parse a `Posting Type` cell. Matching is exact (`Credit`, `Debit`).
    pub fn parse(value: &str) -> Self {
        match value {
            "Credit" => PostingType::Credit,
            "Debit" => PostingType::Debit,
            other => PostingType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PostingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostingType::Credit => write!(f, "Credit"),
            PostingType::Debit => write!(f, "Debit"),
            PostingType::Other(value) => write!(f, "{}", value),
        }
    }
}

/// One input record
///
/// Optional columns that are absent from the file, or blank in this row,
/// are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file (header is line 1)
    pub line: u64,
    pub journal_entry_id: JournalEntryId,
    /// Raw `Transaction Date` cell; parsed during assembly
    pub transaction_date: Option<String>,
    pub customer_name: Option<String>,
    pub class: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub posting_type: PostingType,
    pub amount: Option<Decimal>,
    pub subsidiary: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
}
