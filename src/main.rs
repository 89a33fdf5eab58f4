//! Journal Target CLI
//!
//! Command-line interface for posting journal entries read from
//! `JournalEntries.csv`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --config config.json
//! cargo run -- --config config.json --strategy sync
//! cargo run -- --config config.json --strategy async
//! cargo run -- --config config.json --strategy async --max-concurrent 8
//! ```
//!
//! The configuration file names the directory holding `JournalEntries.csv`
//! and the reference collections. Submitted entries are written as JSON lines
//! to `output_path` or stdout; logs go to stderr (`RUST_LOG` overrides the
//! default `journal_target=info` filter).
//!
//! # Processing Strategies
//!
//! - **sync**: Sequential parsing and assembly (default)
//! - **async**: Chunked parsing with concurrent assembly
//!
//! # Exit Codes
//!
//! - 0: Success, or no `JournalEntries.csv` to process
//! - 1: Fatal error (bad config, missing columns, malformed rows), or at
//!   least one entry was rejected

use journal_target::cli::{self, TargetConfig};
use journal_target::client::FileLedgerClient;
use journal_target::strategy::{self, RunOptions};
use journal_target::types::TargetError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "journal_target=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn open_output(config: &TargetConfig) -> Result<Box<dyn Write + Send>, TargetError> {
    match &config.output_path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout())),
    }
}

fn run() -> Result<bool, TargetError> {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let config = TargetConfig::load(&args.config)?;

    let input_path = config.journal_entries_path();
    if !input_path.exists() {
        info!(path = %input_path.display(), "No journal entries found, nothing to post");
        return Ok(true);
    }

    info!(reference_dir = %config.reference_dir().display(), "Starting journal entry posting");
    let mut client = FileLedgerClient::new(config.reference_dir(), open_output(&config)?);

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let async_config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_async_config())
        } else {
            None
        };
        strategy::create_strategy(
            args.strategy,
            async_config,
            RunOptions {
                skip_empty_entries: config.skip_empty_entries,
            },
        )
    };

    let summary = strategy.process(&input_path, &mut client)?;
    info!(
        entries = summary.entries_loaded,
        posted = summary.posted,
        failed = summary.failed,
        skipped_empty = summary.skipped_empty,
        skipped_rows = summary.skipped_rows,
        "Posting finished"
    );

    Ok(!summary.has_failures())
}

fn main() {
    init_tracing();

    match run() {
        Ok(true) => {}
        Ok(false) => {
            error!("Some journal entries could not be posted");
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
