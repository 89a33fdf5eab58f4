//! Processing strategy module
//!
//! This module defines the Strategy pattern for the complete pipeline:
//! header validation, reference loading, grouping, assembly and posting.
//! Different implementations (sequential, concurrent assembly) can be
//! selected at runtime and produce identical submissions for the same input.

use crate::cli::StrategyType;
use crate::core::{AssembledEntry, EmitStatus, EntryEmitter, LedgerClient, PostOutcome};
use crate::types::{JournalEntry, TargetError};
use std::path::Path;
use tracing::info;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncConfig, AsyncProcessingStrategy};
pub use sync::SyncProcessingStrategy;

/// Behaviour shared by every strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Do not post entries without lines
    pub skip_empty_entries: bool,
}

/// Counts describing one finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Journal entries assembled from the input
    pub entries_loaded: usize,
    pub posted: usize,
    pub failed: usize,
    /// Entries left out because they had no lines
    pub skipped_empty: usize,
    /// Rows left out because their account did not resolve
    pub skipped_rows: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Processing strategy trait for the complete pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Transform the rows in `input_path` and post the resulting entries
    ///
    /// Reference collections are fetched once through `client`, entries are
    /// posted through it one at a time.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` once every entry has been attempted, including
    ///   runs where some entries were rejected by the ledger
    /// * `Err(TargetError)` on a fatal error: unreadable input, missing
    ///   columns, malformed rows or a failed assembly
    fn process(
        &self,
        input_path: &Path,
        client: &mut dyn LedgerClient,
    ) -> Result<RunSummary, TargetError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async processing (ignored for sync)
/// * `options` - Options shared by every strategy
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<AsyncConfig>,
    options: RunOptions,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(options)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, options))
        }
    }
}

/// Post assembled entries and summarize the outcome
pub(crate) fn emit_entries(
    assembled: Vec<AssembledEntry>,
    client: &mut dyn LedgerClient,
    options: RunOptions,
) -> RunSummary {
    info!("Loaded {} journal entries to post", assembled.len());

    let skipped_rows = assembled.iter().map(|a| a.skipped.len()).sum();
    let entries: Vec<JournalEntry> = assembled.into_iter().map(|a| a.entry).collect();
    let outcomes = EntryEmitter::new(options.skip_empty_entries).emit(&entries, client);

    summarize(&outcomes, skipped_rows)
}

fn summarize(outcomes: &[PostOutcome], skipped_rows: usize) -> RunSummary {
    let mut summary = RunSummary {
        entries_loaded: outcomes.len(),
        skipped_rows,
        ..RunSummary::default()
    };
    for outcome in outcomes {
        match outcome.status {
            EmitStatus::Posted(_) => summary.posted += 1,
            EmitStatus::Failed(_) => summary.failed += 1,
            EmitStatus::SkippedEmpty => summary.skipped_empty += 1,
        }
    }
    summary
}
