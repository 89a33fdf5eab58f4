//! Ledger collaborators
//!
//! Concrete [`LedgerClient`](crate::core::LedgerClient) implementations:
//! - `file` - Reference collections from JSON files, entries written as JSON lines
//! - `memory` - Everything in memory, for embedding and tests

pub mod file;
pub mod memory;

pub use file::FileLedgerClient;
pub use memory::InMemoryLedgerClient;
