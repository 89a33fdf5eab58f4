//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the pipeline by delegating:
//! - CSV parsing and header validation to `SyncReader`
//! - Reference loading to `ReferenceIndex`
//! - Grouping to `group_rows`
//! - Entry construction to `EntryAssembler`
//! - Posting to `EntryEmitter`

use crate::core::{group_rows, EntryAssembler, LedgerClient, ReferenceIndex};
use crate::io::sync_reader::SyncReader;
use crate::strategy::{emit_entries, ProcessingStrategy, RunOptions, RunSummary};
use crate::types::{RawRow, TargetError};
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use journal_target::client::InMemoryLedgerClient;
/// use journal_target::strategy::{ProcessingStrategy, RunOptions, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(RunOptions::default());
/// let mut client = InMemoryLedgerClient::new();
///
/// let summary = strategy
///     .process(Path::new("JournalEntries.csv"), &mut client)
///     .expect("Processing failed");
/// println!("Posted {} entries", summary.posted);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    options: RunOptions,
}

impl SyncProcessingStrategy {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Run the pipeline sequentially
    ///
    /// 1. Opens the CSV and validates its header (fatal on missing columns)
    /// 2. Loads the reference index through the client
    /// 3. Reads every row; the first malformed row is fatal
    /// 4. Groups rows and assembles one entry per group, in group order
    /// 5. Posts the entries one at a time
    fn process(
        &self,
        input_path: &Path,
        client: &mut dyn LedgerClient,
    ) -> Result<RunSummary, TargetError> {
        let reader = SyncReader::new(input_path)?;

        let index = ReferenceIndex::load(client);

        let rows = reader.collect::<Result<Vec<RawRow>, TargetError>>()?;
        let groups = group_rows(rows);

        let assembler = EntryAssembler::new(&index);
        let assembled = groups
            .iter()
            .map(|group| assembler.assemble(group))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(emit_entries(assembled, client, self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryLedgerClient;
    use crate::core::ReferenceCollection;
    use crate::types::AccountRecord;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Transaction Date,Journal Entry Id,Customer Name,Class,Account Number,Account Name,Posting Type,Amount,Description\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn client() -> InMemoryLedgerClient {
        InMemoryLedgerClient::new().with_accounts(vec![AccountRecord {
            acct_number: Some("100".to_string()),
            acct_name: Some("Cash".to_string()),
            internal_id: Some("1".to_string()),
            ..AccountRecord::default()
        }])
    }

    #[test]
    fn test_sync_strategy_posts_one_entry_per_group() {
        let content = format!(
            "{}2024-01-31,JE1,Acme,Sales,100,Cash,Credit,150.004,Rent\n\
             2024-01-31,JE1,Acme,Sales,999,Unknown,Debit,150.004,Rent\n\
             2024-02-01,JE2,Acme,Sales,100,Cash,Debit,5,Fee\n",
            HEADER
        );
        let file = create_temp_csv(&content);
        let mut client = client();

        let summary = SyncProcessingStrategy::default()
            .process(file.path(), &mut client)
            .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                entries_loaded: 2,
                posted: 2,
                failed: 0,
                skipped_empty: 0,
                skipped_rows: 1,
            }
        );
        let posted = client.posted();
        assert_eq!(posted[0]["externalId"], "JE1");
        assert_eq!(posted[0]["lineList"].as_array().unwrap().len(), 1);
        assert_eq!(posted[0]["lineList"][0]["credit"], 150.0);
        assert_eq!(posted[1]["externalId"], "JE2");
    }

    #[test]
    fn test_sync_strategy_fails_on_missing_description() {
        let file = create_temp_csv(
            "Transaction Date,Journal Entry Id,Customer Name,Class,Account Number,Account Name,Posting Type\n\
             2024-01-31,JE1,Acme,Sales,100,Cash,Credit\n",
        );
        let mut client = client();

        let result = SyncProcessingStrategy::default().process(file.path(), &mut client);

        assert!(matches!(result, Err(TargetError::MissingColumns { .. })));
        assert!(client.posted().is_empty());
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut client = client();
        let result =
            SyncProcessingStrategy::default().process(Path::new("nonexistent.csv"), &mut client);

        assert!(matches!(result, Err(TargetError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_stops_on_malformed_row() {
        let content = format!(
            "{}2024-01-31,JE1,Acme,Sales,100,Cash,Credit,1,Rent\n\
             2024-01-31,JE2,Acme,Sales,100,Cash,Credit,abc,Rent\n",
            HEADER
        );
        let file = create_temp_csv(&content);
        let mut client = client();

        let result = SyncProcessingStrategy::default().process(file.path(), &mut client);

        assert_eq!(result, Err(TargetError::invalid_amount("abc", 3)));
        assert!(client.posted().is_empty());
    }

    #[test]
    fn test_sync_strategy_survives_missing_accounts_collection() {
        let content = format!("{}2024-01-31,JE1,Acme,Sales,100,Cash,Credit,1,Rent\n", HEADER);
        let file = create_temp_csv(&content);
        let mut client = client();
        client.fail_fetch(ReferenceCollection::Accounts, "Request error");

        let summary = SyncProcessingStrategy::default()
            .process(file.path(), &mut client)
            .unwrap();

        assert_eq!(summary.posted, 1);
        assert_eq!(summary.skipped_rows, 1);
        assert_eq!(client.posted()[0]["lineList"], serde_json::json!([]));
    }

    #[test]
    fn test_sync_strategy_skips_empty_entries_when_asked() {
        let content = format!("{}2024-01-31,JE1,Acme,Sales,999,Cash,Credit,1,Rent\n", HEADER);
        let file = create_temp_csv(&content);
        let mut client = client();

        let summary = SyncProcessingStrategy::new(RunOptions {
            skip_empty_entries: true,
        })
        .process(file.path(), &mut client)
        .unwrap();

        assert_eq!(summary.skipped_empty, 1);
        assert_eq!(summary.posted, 0);
        assert!(client.posted().is_empty());
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
