//! Core transformation module
//!
//! This module contains the components that turn rows into journal entries:
//! - `traits` - The ledger collaborator trait
//! - `reference_index` - Read-only lookup tables over the reference collections
//! - `grouper` - Partitioning rows into transactions
//! - `assembler` - Reference resolution and entry construction
//! - `emitter` - Serialization and posting

pub mod assembler;
pub mod emitter;
pub mod grouper;
pub mod reference_index;
pub mod traits;

pub use assembler::{AssembledEntry, EntryAssembler, SkippedRow};
pub use emitter::{EmitStatus, EntryEmitter, PostOutcome};
pub use grouper::{group_rows, RowGroup};
pub use reference_index::{ReferenceCollections, ReferenceIndex, ResolvedAccount};
pub use traits::{LedgerClient, ReferenceCollection};
