//! Asynchronous processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Rows are read through `AsyncReader`, grouped
//! once the whole file has been read (a transaction's rows may sit anywhere
//! in the file), and the groups are assembled concurrently on a tokio
//! runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── AsyncConfig (max_concurrent)
//!     ├── AsyncReader (chunked CSV reading)
//!     ├── group_rows (whole-file grouping)
//!     ├── EntryAssembler per group (spawned tasks, shared Arc<ReferenceIndex>)
//!     └── EntryEmitter (sequential posting)
//! ```
//!
//! # Ordering
//!
//! Groups are assembled out of order but collected with `buffered`, which
//! yields results in submission order. Posting happens on the calling thread
//! once every group is assembled, so the ledger sees the same sequence of
//! entries as with the sync strategy.

use crate::core::{
    group_rows, AssembledEntry, EntryAssembler, LedgerClient, ReferenceIndex, RowGroup,
};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{emit_entries, ProcessingStrategy, RunOptions, RunSummary};
use crate::types::TargetError;
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};
use tracing::{debug, warn};

/// Rows pulled from the reader per await; grouping only starts at end of file
const READ_CHUNK_ROWS: usize = 1024;

/// Configuration for concurrent assembly
#[derive(Clone, Debug)]
pub struct AsyncConfig {
    /// Maximum number of groups assembled concurrently, also the worker thread count
    pub max_concurrent: usize,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
        }
    }
}

impl AsyncConfig {
    /// Create a new AsyncConfig
    ///
    /// Zero is replaced by the default.
    pub fn new(max_concurrent: usize) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self { max_concurrent }
    }
}

/// Asynchronous processing strategy
///
/// # Thread Safety
///
/// The reference index is built once and shared read-only between the
/// assembly tasks behind an `Arc`. The ledger client is only ever used from
/// the thread driving the runtime.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: AsyncConfig,
    options: RunOptions,
}

impl AsyncProcessingStrategy {
    pub fn new(config: AsyncConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    async fn open_reader(
        &self,
        input_path: &Path,
    ) -> Result<AsyncReader<Compat<File>>, TargetError> {
        let file = File::open(input_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    TargetError::file_not_found(input_path.display().to_string())
                }
                _ => TargetError::from(e),
            })?;

        AsyncReader::new(file.compat()).await
    }

    async fn assemble_all(
        &self,
        index: Arc<ReferenceIndex>,
        groups: Vec<RowGroup>,
    ) -> Result<Vec<AssembledEntry>, TargetError> {
        let results: Vec<_> = stream::iter(groups)
            .map(|group| {
                let index = Arc::clone(&index);
                tokio::spawn(async move { EntryAssembler::new(&index).assemble(&group) })
            })
            .buffered(self.config.max_concurrent)
            .collect()
            .await;

        results
            .into_iter()
            .map(|joined| {
                joined
                    .map_err(|e| TargetError::assembly_failed(e.to_string()))
                    .and_then(|assembled| assembled)
            })
            .collect()
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the pipeline with concurrent assembly
    ///
    /// 1. Creates a tokio multi-threaded runtime with `max_concurrent` workers
    /// 2. Opens the CSV and validates its header (fatal on missing columns)
    /// 3. Loads the reference index through the client
    /// 4. Reads every row; the first malformed row is fatal
    /// 5. Groups the rows and assembles the groups concurrently
    /// 6. Posts the entries one at a time, in group order
    fn process(
        &self,
        input_path: &Path,
        client: &mut dyn LedgerClient,
    ) -> Result<RunSummary, TargetError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .enable_all()
            .build()
            .map_err(|e| {
                TargetError::assembly_failed(format!("Failed to create tokio runtime: {}", e))
            })?;

        let assembled = runtime.block_on(async {
            let mut reader = self.open_reader(input_path).await?;

            let index = Arc::new(ReferenceIndex::load(client));

            let mut rows = Vec::new();
            loop {
                let chunk = reader.read_batch(READ_CHUNK_ROWS).await?;
                if chunk.is_empty() {
                    break;
                }
                rows.extend(chunk);
            }

            debug!(rows = rows.len(), "Read journal entry rows");
            let groups = group_rows(rows);
            self.assemble_all(index, groups).await
        })?;

        Ok(emit_entries(assembled, client, self.options))
    }
}
