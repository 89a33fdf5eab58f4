//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over journal entry rows from a CSV file.
//! Supports batch reading for the async processing strategy.
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of RawRows
//!                  ↓
//!           csv_format module
//!           (CsvRow, convert_csv_row, validate_columns)
//! ```

use crate::io::csv_format::{convert_csv_row, validate_columns, CsvRow};
use crate::types::{RawRow, TargetError};
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;

/// Asynchronous CSV reader
///
/// The header is validated in [`AsyncReader::new`]; batches only ever
/// contain rows from a file with a complete schema.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: StringRecord,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Returns
    ///
    /// * `Ok(AsyncReader)` if the header carries every required column
    /// * `Err(TargetError::MissingColumns)` otherwise
    pub async fn new(reader: R) -> Result<Self, TargetError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        let headers = csv_reader.headers().await?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        validate_columns(&columns)?;

        Ok(Self {
            csv_reader,
            headers,
        })
    }

    /// Read a batch of rows
    ///
    /// Reads up to `batch_size` rows. Returns an empty vector once the end
    /// of the file is reached. The first malformed row aborts the batch.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<RawRow>, TargetError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut record = StringRecord::new();

        while batch.len() < batch_size {
            if !self.csv_reader.read_record(&mut record).await? {
                break;
            }

            let line = record.position().map_or(0, |pos| pos.line());
            let csv_row: CsvRow = record.deserialize(Some(&self.headers))?;
            batch.push(convert_csv_row(csv_row, line)?);
        }

        Ok(batch)
    }
}
