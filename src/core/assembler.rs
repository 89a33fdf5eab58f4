//! Entry assembler
//!
//! Turns one [`RowGroup`] into one [`JournalEntry`]. Rows are processed in
//! group order:
//!
//! 1. The account number must resolve, otherwise the row is skipped with a
//!    warning and contributes nothing else to the entry.
//! 2. A subsidiary is taken from the row's `Subsidiary` cell, or else from
//!    the account's default. Credit rows set `toSubsidiary`, debit rows set
//!    `subsidiary`; a later row overwrites an earlier one on the same side.
//! 3. Class and department resolve by token, location by exact name.
//! 4. The amount, rounded to two places, becomes the credit or the debit.
//! 5. Every line carries the first row's description as memo.
//!
//! Header fields come from the group as a whole: the date from the first
//! row, the currency from the last row that produced a line. When both
//! subsidiaries end up with the same internal id only `subsidiary` is kept.

use crate::core::grouper::RowGroup;
use crate::core::reference_index::ReferenceIndex;
use crate::types::{JournalEntry, JournalEntryLine, PostingType, RawRow, RecordRef, TargetError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A row left out of its entry because its account did not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub account_number: Option<String>,
}

/// Result of assembling one group
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledEntry {
    pub entry: JournalEntry,
    pub skipped: Vec<SkippedRow>,
}

/// Builds journal entries against a shared, read-only reference index
#[derive(Debug, Clone, Copy)]
pub struct EntryAssembler<'a> {
    index: &'a ReferenceIndex,
}

/// Most recent subsidiary seen on each side of the entry
#[derive(Debug, Default)]
struct Subsidiaries {
    debit_side: Option<RecordRef>,
    credit_side: Option<RecordRef>,
}

impl Subsidiaries {
    fn record(&mut self, posting_type: &PostingType, subsidiary: RecordRef) {
        match posting_type {
            PostingType::Credit => self.credit_side = Some(subsidiary),
            PostingType::Debit => self.debit_side = Some(subsidiary),
            PostingType::Other(_) => {}
        }
    }

    /// A same-subsidiary transfer keeps only the debit side
    fn collapse(self) -> (Option<RecordRef>, Option<RecordRef>) {
        match (self.debit_side, self.credit_side) {
            (Some(debit), Some(credit)) if debit.internal_id == credit.internal_id => {
                (Some(debit), None)
            }
            (debit, credit) => (debit, credit),
        }
    }
}

impl<'a> EntryAssembler<'a> {
    pub fn new(index: &'a ReferenceIndex) -> Self {
        EntryAssembler { index }
    }

    /// Assemble one group into a journal entry
    ///
    /// A group whose rows all fail account resolution still yields an entry,
    /// with an empty line list.
    ///
    /// # Errors
    ///
    /// Returns `TargetError::InvalidDate` if the first row's transaction date
    /// is present but cannot be parsed, and `TargetError::AssemblyFailed` for
    /// a group without rows.
    pub fn assemble(&self, group: &RowGroup) -> Result<AssembledEntry, TargetError> {
        let journal_entry_id = group.journal_entry_id();
        let first_row = group.first_row().ok_or_else(|| {
            TargetError::assembly_failed(format!(
                "journal entry {} has no rows",
                journal_entry_id
            ))
        })?;
        let memo = first_row.description.clone().unwrap_or_default();
        let date = parse_transaction_date(first_row.transaction_date.as_deref(), journal_entry_id)?;

        let mut lines = Vec::with_capacity(group.rows().len());
        let mut skipped = Vec::new();
        let mut subsidiaries = Subsidiaries::default();
        // Currency cell of the last row that produced a line
        let mut currency_symbol: Option<&str> = None;

        for row in group.rows() {
            match self.build_line(row, &memo, &mut subsidiaries) {
                Some(line) => {
                    currency_symbol = row.currency.as_deref();
                    lines.push(line);
                }
                None => {
                    warn!(
                        journal_entry_id = %journal_entry_id,
                        line = row.line,
                        "{} is not valid for this ledger account, skipping line",
                        row.account_number.as_deref().unwrap_or("<blank>")
                    );
                    skipped.push(SkippedRow {
                        line: row.line,
                        account_number: row.account_number.clone(),
                    });
                }
            }
        }

        let currency = currency_symbol
            .and_then(|symbol| self.index.currency(symbol))
            .cloned();

        let (subsidiary, to_subsidiary) = subsidiaries.collapse();

        debug!(
            journal_entry_id = %journal_entry_id,
            lines = lines.len(),
            skipped = skipped.len(),
            "Assembled journal entry"
        );

        Ok(AssembledEntry {
            entry: JournalEntry {
                created_date: date,
                tran_date: date,
                external_id: journal_entry_id.to_string(),
                currency,
                subsidiary,
                to_subsidiary,
                line_list: lines,
            },
            skipped,
        })
    }

    /// Build the line for one row, or `None` if its account is unknown
    fn build_line(
        &self,
        row: &RawRow,
        memo: &str,
        subsidiaries: &mut Subsidiaries,
    ) -> Option<JournalEntryLine> {
        let account = self.index.account(row.account_number.as_deref()?)?;

        let subsidiary = match &row.subsidiary {
            Some(internal_id) => Some(RecordRef::from_internal_id(internal_id.as_str())),
            None => account.default_subsidiary.clone(),
        };
        if let Some(subsidiary) = subsidiary {
            subsidiaries.record(&row.posting_type, subsidiary);
        }

        let amount = row.amount.map(|amount| amount.round_dp(2));
        if amount.is_none() && !matches!(row.posting_type, PostingType::Other(_)) {
            warn!(
                journal_entry_id = %row.journal_entry_id,
                line = row.line,
                "{} row has no amount",
                row.posting_type
            );
        }
        let (credit, debit) = match row.posting_type {
            PostingType::Credit => (amount, None),
            PostingType::Debit => (None, amount),
            PostingType::Other(_) => (None, None),
        };

        Some(JournalEntryLine {
            account: account.reference.clone(),
            classification: row
                .class
                .as_deref()
                .and_then(|label| self.index.classification(label))
                .cloned(),
            department: row
                .department
                .as_deref()
                .and_then(|label| self.index.department(label))
                .cloned(),
            location: row
                .location
                .as_deref()
                .and_then(|name| self.index.location(name))
                .cloned(),
            credit,
            debit,
            memo: memo.to_string(),
        })
    }
}

/// Parse a `Transaction Date` cell
///
/// Blank dates are `Ok(None)`. Accepts ISO dates, slash-separated dates
/// (`YYYY/MM/DD`, `MM/DD/YYYY`), ISO date-times and RFC 3339 timestamps;
/// the time part is dropped.
pub fn parse_transaction_date(
    value: Option<&str>,
    journal_entry_id: &str,
) -> Result<Option<NaiveDate>, TargetError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
        .map(Some)
        .ok_or_else(|| TargetError::invalid_date(value, journal_entry_id))
}
