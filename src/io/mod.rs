//! I/O module
//!
//! Handles CSV parsing and schema validation.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (column set, header validation, row conversion)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_csv_row, validate_columns, CsvRow, JOURNAL_ENTRIES_FILE, REQUIRED_COLUMNS,
};
pub use sync_reader::SyncReader;
