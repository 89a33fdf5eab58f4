//! File-backed ledger client
//!
//! Reference collections are read from `<reference_dir>/<Collection>.json`
//! (a JSON array per collection, e.g. `Accounts.json`). Posted entries are
//! written to the output as one JSON document per line.
//!
//! A missing or malformed collection file is reported as a
//! `TargetError::ReferenceFetch`, so the run continues without it.

use crate::core::traits::{LedgerClient, ReferenceCollection};
use crate::types::{AccountRecord, CurrencyRecord, PostResponse, ReferenceRecord, TargetError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

pub struct FileLedgerClient {
    reference_dir: PathBuf,
    output: Box<dyn Write + Send>,
}

impl FileLedgerClient {
    /// # Arguments
    ///
    /// * `reference_dir` - Directory holding the collection files
    /// * `output` - Receives one JSON line per posted entry
    pub fn new(reference_dir: impl Into<PathBuf>, output: Box<dyn Write + Send>) -> Self {
        FileLedgerClient {
            reference_dir: reference_dir.into(),
            output,
        }
    }

    pub fn reference_dir(&self) -> &Path {
        &self.reference_dir
    }

    /// Path of the file backing `collection`
    pub fn collection_path(&self, collection: ReferenceCollection) -> PathBuf {
        self.reference_dir
            .join(format!("{}.json", collection.name()))
    }

    fn read_collection<T: DeserializeOwned>(
        &self,
        collection: ReferenceCollection,
    ) -> Result<Vec<T>, TargetError> {
        let path = self.collection_path(collection);
        let file = File::open(&path).map_err(|e| {
            TargetError::reference_fetch(
                collection.name(),
                &format!("cannot open {}: {}", path.display(), e),
            )
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TargetError::reference_fetch(
                collection.name(),
                &format!("cannot parse {}: {}", path.display(), e),
            )
        })
    }
}

impl LedgerClient for FileLedgerClient {
    fn fetch_accounts(&mut self) -> Result<Vec<AccountRecord>, TargetError> {
        self.read_collection(ReferenceCollection::Accounts)
    }

    fn fetch_classifications(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.read_collection(ReferenceCollection::Classifications)
    }

    fn fetch_departments(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.read_collection(ReferenceCollection::Departments)
    }

    fn fetch_locations(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.read_collection(ReferenceCollection::Locations)
    }

    fn fetch_currencies(&mut self) -> Result<Vec<CurrencyRecord>, TargetError> {
        self.read_collection(ReferenceCollection::Currencies)
    }

    fn post_journal_entry(
        &mut self,
        payload: &serde_json::Value,
    ) -> Result<PostResponse, TargetError> {
        let external_id = payload["externalId"].as_str().map(str::to_string);
        let fail = |e: &dyn std::fmt::Display| {
            TargetError::post_failed(external_id.as_deref().unwrap_or_default(), e.to_string())
        };

        serde_json::to_writer(&mut self.output, payload).map_err(|e| fail(&e))?;
        writeln!(self.output).map_err(|e| fail(&e))?;
        self.output.flush().map_err(|e| fail(&e))?;

        Ok(PostResponse::accepted(external_id))
    }
}
