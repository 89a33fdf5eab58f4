//! Transaction grouper
//!
//! Partitions rows by `Journal Entry Id`. Rows keep their original relative
//! order inside a group, and groups come out in the order their id was first
//! seen. Memo, date and currency derivation depend on first/last row, so
//! this order is part of the contract.

use crate::types::{JournalEntryId, RawRow};
use std::collections::HashMap;

/// All rows of one transaction, in file order
///
/// Groups are only built by [`group_rows`], which never yields an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    journal_entry_id: JournalEntryId,
    rows: Vec<RawRow>,
}

impl RowGroup {
    pub fn journal_entry_id(&self) -> &str {
        &self.journal_entry_id
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn first_row(&self) -> Option<&RawRow> {
        self.rows.first()
    }

    #[cfg(test)]
    pub(crate) fn from_rows(journal_entry_id: &str, rows: Vec<RawRow>) -> Self {
        RowGroup {
            journal_entry_id: journal_entry_id.to_string(),
            rows,
        }
    }
}

/// Group rows by journal entry id
pub fn group_rows(rows: impl IntoIterator<Item = RawRow>) -> Vec<RowGroup> {
    let mut groups: Vec<RowGroup> = Vec::new();
    let mut positions: HashMap<JournalEntryId, usize> = HashMap::new();

    for row in rows {
        match positions.get(&row.journal_entry_id) {
            Some(&position) => groups[position].rows.push(row),
            None => {
                positions.insert(row.journal_entry_id.clone(), groups.len());
                groups.push(RowGroup {
                    journal_entry_id: row.journal_entry_id.clone(),
                    rows: vec![row],
                });
            }
        }
    }

    groups
}
