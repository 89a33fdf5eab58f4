//! Run configuration
//!
//! Loaded from the JSON file passed with `--config`. Keys this tool does not
//! know about (ledger credentials used by other tooling, for instance) are
//! ignored.

use crate::io::JOURNAL_ENTRIES_FILE;
use crate::types::TargetError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetConfig {
    /// Directory holding `JournalEntries.csv`
    pub input_path: PathBuf,

    /// Directory holding the reference collection files; defaults to `input_path`
    #[serde(default)]
    pub reference_path: Option<PathBuf>,

    /// File receiving posted entries as JSON lines; stdout when unset
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Do not post entries that ended up without lines
    #[serde(default)]
    pub skip_empty_entries: bool,
}

impl TargetConfig {
    pub fn load(path: &Path) -> Result<Self, TargetError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TargetError::file_not_found(path.display().to_string()),
            _ => TargetError::from(e),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, TargetError> {
        serde_json::from_str(content).map_err(|e| TargetError::config(e.to_string()))
    }

    pub fn journal_entries_path(&self) -> PathBuf {
        self.input_path.join(JOURNAL_ENTRIES_FILE)
    }

    pub fn reference_dir(&self) -> &Path {
        self.reference_path.as_deref().unwrap_or(&self.input_path)
    }
}
