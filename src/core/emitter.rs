//! Entry emitter
//!
//! Serializes assembled entries into the submission shape and posts them
//! one at a time. Entries are independent: a rejected entry is reported in
//! its own [`PostOutcome`] and the remaining entries are still posted.

use crate::core::traits::LedgerClient;
use crate::types::{JournalEntry, PostResponse, TargetError};
use serde_json::json;
use tracing::{error, info, warn};

/// What happened to one entry
#[derive(Debug, Clone, PartialEq)]
pub enum EmitStatus {
    Posted(PostResponse),
    Failed(TargetError),
    /// Entry had no lines and empty entries are not submitted
    SkippedEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostOutcome {
    pub external_id: String,
    pub status: EmitStatus,
}

impl PostOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, EmitStatus::Failed(_))
    }
}

/// Serialize an entry into the payload handed to the ledger
pub fn to_submission(entry: &JournalEntry) -> Result<serde_json::Value, TargetError> {
    serde_json::to_value(entry)
        .map_err(|e| TargetError::post_failed(&entry.external_id, e.to_string()))
}

/// Posts entries through a [`LedgerClient`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryEmitter {
    skip_empty_entries: bool,
}

impl EntryEmitter {
    /// # Arguments
    ///
    /// * `skip_empty_entries` - When true, entries without lines are not posted
    pub fn new(skip_empty_entries: bool) -> Self {
        EntryEmitter { skip_empty_entries }
    }

    /// Post every entry in order, collecting one outcome per entry
    pub fn emit(&self, entries: &[JournalEntry], client: &mut dyn LedgerClient) -> Vec<PostOutcome> {
        entries
            .iter()
            .map(|entry| self.emit_one(entry, client))
            .collect()
    }

    pub fn emit_one(&self, entry: &JournalEntry, client: &mut dyn LedgerClient) -> PostOutcome {
        let status = if self.skip_empty_entries && entry.is_empty() {
            warn!(
                journal_entry_id = %entry.external_id,
                "Journal entry has no lines, not posting it"
            );
            EmitStatus::SkippedEmpty
        } else {
            match to_submission(entry).and_then(|payload| client.post_journal_entry(&payload)) {
                Ok(response) => {
                    info!("{}", json!({ "JournalEntry": &response }));
                    EmitStatus::Posted(response)
                }
                Err(e) => {
                    error!(journal_entry_id = %entry.external_id, "{}", e);
                    EmitStatus::Failed(e)
                }
            }
        };

        PostOutcome {
            external_id: entry.external_id.clone(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryLedgerClient;
    use crate::types::{JournalEntryLine, RecordRef};
    use rust_decimal::Decimal;

    fn entry(external_id: &str, lines: usize) -> JournalEntry {
        JournalEntry {
            created_date: None,
            tran_date: None,
            external_id: external_id.to_string(),
            currency: None,
            subsidiary: None,
            to_subsidiary: None,
            line_list: (0..lines)
                .map(|_| JournalEntryLine {
                    account: RecordRef::from_internal_id("1"),
                    classification: None,
                    department: None,
                    location: None,
                    credit: Some(Decimal::ONE),
                    debit: None,
                    memo: "memo".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_emit_posts_in_order() {
        let mut client = InMemoryLedgerClient::new();
        let outcomes =
            EntryEmitter::default().emit(&[entry("JE1", 1), entry("JE2", 2)], &mut client);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| matches!(o.status, EmitStatus::Posted(_))));

        let posted: Vec<&str> = client
            .posted()
            .iter()
            .map(|p| p["externalId"].as_str().unwrap())
            .collect();
        assert_eq!(posted, vec!["JE1", "JE2"]);
    }

    #[test]
    fn test_emit_failure_does_not_stop_later_entries() {
        let mut client = InMemoryLedgerClient::new();
        client.fail_post("JE1", "duplicate external id");

        let outcomes =
            EntryEmitter::default().emit(&[entry("JE1", 1), entry("JE2", 1)], &mut client);

        assert_eq!(
            outcomes[0].status,
            EmitStatus::Failed(TargetError::post_failed("JE1", "duplicate external id"))
        );
        assert!(outcomes[0].is_failure());
        assert!(matches!(outcomes[1].status, EmitStatus::Posted(_)));
        assert_eq!(client.posted().len(), 1);
    }

    #[test]
    fn test_empty_entries_are_posted_by_default() {
        let mut client = InMemoryLedgerClient::new();
        let outcomes = EntryEmitter::default().emit(&[entry("JE1", 0)], &mut client);

        assert!(matches!(outcomes[0].status, EmitStatus::Posted(_)));
        assert_eq!(client.posted()[0]["lineList"], json!([]));
    }

    #[test]
    fn test_empty_entries_can_be_skipped() {
        let mut client = InMemoryLedgerClient::new();
        let outcomes =
            EntryEmitter::new(true).emit(&[entry("JE1", 0), entry("JE2", 1)], &mut client);

        assert_eq!(outcomes[0].status, EmitStatus::SkippedEmpty);
        assert!(matches!(outcomes[1].status, EmitStatus::Posted(_)));
        assert_eq!(client.posted().len(), 1);
    }

    #[test]
    fn test_to_submission_shape() {
        let payload = to_submission(&entry("JE1", 1)).unwrap();

        assert_eq!(payload["externalId"], json!("JE1"));
        assert_eq!(payload["createdDate"], json!(null));
        assert_eq!(payload["lineList"][0]["credit"], json!(1.0));
        assert!(payload.get("currency").is_none());
        assert!(payload.get("toSubsidiary").is_none());
    }
}
