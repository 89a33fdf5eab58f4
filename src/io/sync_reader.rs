//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over journal entry rows from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The header is read and checked against the required column set when the
//! reader is created, so a schema error surfaces before a single row is
//! yielded. Rows are then deserialized one `StringRecord` at a time, which
//! gives each row its real line number even when quoted cells span lines.
//!
//! ```no_run
//! use journal_target::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("JournalEntries.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(row) => println!("Read row for entry {}", row.journal_entry_id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, missing columns) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator

use crate::io::csv_format::{convert_csv_row, validate_columns, CsvRow};
use crate::types::{RawRow, TargetError};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file, reads its header and validates it. The CSV reader
    /// is configured to:
    /// - Trim whitespace from all fields (headers included)
    /// - Allow flexible field counts (trailing optional cells may be missing)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the file opened and carries every required column
    /// * `Err(TargetError::FileNotFound)` if the file could not be opened
    /// * `Err(TargetError::MissingColumns)` if the header is incomplete
    pub fn new(path: &Path) -> Result<Self, TargetError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TargetError::file_not_found(path.display().to_string()),
            _ => TargetError::from(e),
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        validate_columns(&columns)?;

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    /// Column names found in the header
    pub fn columns(&self) -> Vec<String> {
        self.headers.iter().map(str::to_string).collect()
    }
}

impl Iterator for SyncReader {
    type Item = Result<RawRow, TargetError>;

    /// Get the next row from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(RawRow))` - Successfully parsed row
    /// * `Some(Err(TargetError))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map_or(0, |pos| pos.line());
                Some(
                    self.record
                        .deserialize::<CsvRow>(Some(&self.headers))
                        .map_err(TargetError::from)
                        .and_then(|csv_row| convert_csv_row(csv_row, line)),
                )
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
