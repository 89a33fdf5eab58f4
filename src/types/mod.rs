//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `row`: Input rows read from the CSV
//! - `reference`: Fetched reference records and resolved references
//! - `journal`: Assembled journal entries and post responses
//! - `error`: Error types for the journal entry target

pub mod error;
pub mod journal;
pub mod reference;
pub mod row;

pub use error::TargetError;
pub use journal::{JournalEntry, JournalEntryLine, PostResponse, PostStatus};
pub use reference::{AccountRecord, CurrencyRecord, RecordRef, ReferenceRecord};
pub use row::{JournalEntryId, PostingType, RawRow};
