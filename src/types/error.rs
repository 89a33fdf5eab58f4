//! Error types for the journal entry target
//!
//! This module defines all error types that can occur while loading reference
//! data, reading the input CSV, assembling journal entries and posting them.
//!
//! # Error Categories
//!
//! - **File and Config Errors**: File not found, unreadable config, etc.
//! - **Schema Errors**: Required CSV columns are missing (fatal)
//! - **Reference Fetch Errors**: One lookup collection is unavailable (recoverable)
//! - **Assembly Errors**: Malformed amounts or dates inside a group (fatal)
//! - **Posting Errors**: The ledger rejected one entry (per entry)

use thiserror::Error;

/// Main error type for the journal entry target
///
/// Each variant includes enough context to produce a useful log line.
/// Whether a variant stops the run is decided by [`TargetError::is_recoverable`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TargetError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The configuration file could not be read or parsed
    #[error("Invalid configuration: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The input CSV lacks one or more required columns
    ///
    /// This is fatal: no grouping or assembly happens.
    #[error(
        "CSV is missing required columns. Found={}, Required={}",
        render_columns(found),
        render_columns(required)
    )]
    MissingColumns {
        /// Columns present in the input header
        found: Vec<String>,
        /// Columns the input must carry
        required: Vec<String>,
    },

    /// A reference collection could not be fetched
    ///
    /// Recoverable: the collection is absent for the rest of the run.
    #[error("It was not possible to retrieve {collection} data: {message}")]
    ReferenceFetch {
        /// Name of the collection (Accounts, Locations, ...)
        collection: String,
        /// Sanitized failure description
        message: String,
    },

    /// Amount column holds something that is not a decimal number
    #[error("Invalid amount '{amount}' at line {line}")]
    InvalidAmount {
        /// The raw amount value
        amount: String,
        /// Line number of the offending row
        line: u64,
    },

    /// Transaction date could not be parsed
    #[error("Invalid transaction date '{value}' for journal entry {journal_entry_id}")]
    InvalidDate {
        /// The raw date value
        value: String,
        /// Journal entry the date belongs to
        journal_entry_id: String,
    },

    /// Building journal entries failed unexpectedly
    #[error("Building journal entries failed: {message}")]
    AssemblyFailed {
        /// Description of the failure
        message: String,
    },

    /// The ledger refused a journal entry
    #[error("Posting journal entry {external_id} failed: {message}")]
    PostFailed {
        /// External id of the rejected entry
        external_id: String,
        /// Description of the failure
        message: String,
    },
}

fn render_columns(columns: &[String]) -> String {
    serde_json::to_string(columns).unwrap_or_else(|_| columns.join(", "))
}

impl From<std::io::Error> for TargetError {
    fn from(error: std::io::Error) -> Self {
        TargetError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for TargetError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        TargetError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for TargetError {
    fn from(error: csv_async::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        TargetError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for TargetError {
    fn from(error: serde_json::Error) -> Self {
        TargetError::ParseError {
            line: Some(error.line() as u64),
            message: error.to_string(),
        }
    }
}

impl TargetError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        TargetError::FileNotFound { path: path.into() }
    }

    /// Create a ConfigError error
    pub fn config(message: impl Into<String>) -> Self {
        TargetError::ConfigError {
            message: message.into(),
        }
    }

    /// Create a MissingColumns error
    pub fn missing_columns(found: &[String], required: &[&str]) -> Self {
        TargetError::MissingColumns {
            found: found.to_vec(),
            required: required.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Create a ReferenceFetch error, sanitizing the message
    pub fn reference_fetch(collection: &str, message: &str) -> Self {
        TargetError::ReferenceFetch {
            collection: collection.to_string(),
            message: sanitize_fetch_message(message),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, line: u64) -> Self {
        TargetError::InvalidAmount {
            amount: amount.to_string(),
            line,
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(value: &str, journal_entry_id: &str) -> Self {
        TargetError::InvalidDate {
            value: value.to_string(),
            journal_entry_id: journal_entry_id.to_string(),
        }
    }

    /// Create an AssemblyFailed error
    pub fn assembly_failed(message: impl Into<String>) -> Self {
        TargetError::AssemblyFailed {
            message: message.into(),
        }
    }

    /// Create a PostFailed error
    pub fn post_failed(external_id: &str, message: impl Into<String>) -> Self {
        TargetError::PostFailed {
            external_id: external_id.to_string(),
            message: message.into(),
        }
    }

    /// Whether the run may continue after this error
    ///
    /// Reference fetch failures degrade lookups to "not found" and posting
    /// failures only affect their own entry. Everything else stops the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TargetError::ReferenceFetch { .. } | TargetError::PostFailed { .. }
        )
    }
}

/// Soften a collaborator error message before it reaches the log
///
/// `error` becomes `failure` and `Error` is dropped, so warnings about an
/// optional collection do not read like fatal errors.
pub fn sanitize_fetch_message(message: &str) -> String {
    message.replace("error", "failure").replace("Error", "")
}
