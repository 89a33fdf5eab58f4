//! Journal Target Library
//! # Overview
//!
//! This library turns rows exported as `JournalEntries.csv` into journal
//! entries for a multi-entity ledger, implementing both a sync and an async
//! processing strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (rows, reference records, journal entries, errors)
//! - [`cli`] - CLI arguments parsing and the JSON configuration file
//! - [`core`] - Transformation components:
//!   - [`core::reference_index`] - Lookup tables over the ledger's reference collections
//!   - [`core::grouper`] - Partitioning rows by `Journal Entry Id`
//!   - [`core::assembler`] - Reference resolution and entry construction
//!   - [`core::emitter`] - Serialization and posting, one entry at a time
//! - [`client`] - `LedgerClient` implementations (JSON files, in memory)
//! - [`io`] - CSV parsing and header validation
//! - [`strategy`] - The sync and async pipelines
//!
//! # Pipeline
//!
//! ```text
//! JournalEntries.csv → header validation → grouping → assembly → posting
//!                                                ↑
//!                                 ReferenceIndex (fetched once)
//! ```
//!
//! # Journal Entries
//!
//! Each distinct `Journal Entry Id` becomes one entry:
//!
//! - **Lines**: one per row whose account resolves, carrying the rounded
//!   amount on its credit or debit side
//! - **Subsidiary / To Subsidiary**: the default subsidiaries of the debited
//!   and credited accounts, collapsed when both sides agree
//! - **Currency**: taken from the group's last row
//! - **Memo**: the first row's description, shared by every line
//!
//! Rows whose account cannot be resolved are skipped with a warning; the rest
//! of the entry is still built.

// Module declarations
pub mod cli;
pub mod client;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use client::{FileLedgerClient, InMemoryLedgerClient};
pub use core::{
    group_rows, EntryAssembler, EntryEmitter, LedgerClient, ReferenceCollection, ReferenceIndex,
};
pub use strategy::{create_strategy, ProcessingStrategy, RunOptions, RunSummary};
pub use types::{
    AccountRecord, CurrencyRecord, JournalEntry, JournalEntryLine, PostingType, RawRow,
    RecordRef, ReferenceRecord, TargetError,
};
