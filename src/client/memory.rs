//! In-memory ledger client
//!
//! Serves reference collections from vectors and records every posted
//! payload. Fetch and post failures can be injected per collection and per
//! external id.

use crate::core::traits::{LedgerClient, ReferenceCollection};
use crate::types::{AccountRecord, CurrencyRecord, PostResponse, ReferenceRecord, TargetError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerClient {
    accounts: Vec<AccountRecord>,
    classifications: Vec<ReferenceRecord>,
    departments: Vec<ReferenceRecord>,
    locations: Vec<ReferenceRecord>,
    currencies: Vec<CurrencyRecord>,
    fetch_failures: HashMap<ReferenceCollection, String>,
    post_failures: HashMap<String, String>,
    posted: Vec<serde_json::Value>,
}

impl InMemoryLedgerClient {
    /// Client with empty collections that accepts every entry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(mut self, accounts: Vec<AccountRecord>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_classifications(mut self, classifications: Vec<ReferenceRecord>) -> Self {
        self.classifications = classifications;
        self
    }

    pub fn with_departments(mut self, departments: Vec<ReferenceRecord>) -> Self {
        self.departments = departments;
        self
    }

    pub fn with_locations(mut self, locations: Vec<ReferenceRecord>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_currencies(mut self, currencies: Vec<CurrencyRecord>) -> Self {
        self.currencies = currencies;
        self
    }

    /// Make every fetch of `collection` fail with `message`
    pub fn fail_fetch(&mut self, collection: ReferenceCollection, message: &str) {
        self.fetch_failures
            .insert(collection, message.to_string());
    }

    /// Reject the entry with this external id
    pub fn fail_post(&mut self, external_id: &str, message: &str) {
        self.post_failures
            .insert(external_id.to_string(), message.to_string());
    }

    /// Payloads accepted so far, in posting order
    pub fn posted(&self) -> &[serde_json::Value] {
        &self.posted
    }

    fn fetch<T: Clone>(
        &self,
        collection: ReferenceCollection,
        records: &[T],
    ) -> Result<Vec<T>, TargetError> {
        match self.fetch_failures.get(&collection) {
            Some(message) => Err(TargetError::reference_fetch(collection.name(), message)),
            None => Ok(records.to_vec()),
        }
    }
}

impl LedgerClient for InMemoryLedgerClient {
    fn fetch_accounts(&mut self) -> Result<Vec<AccountRecord>, TargetError> {
        self.fetch(ReferenceCollection::Accounts, &self.accounts)
    }

    fn fetch_classifications(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.fetch(ReferenceCollection::Classifications, &self.classifications)
    }

    fn fetch_departments(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.fetch(ReferenceCollection::Departments, &self.departments)
    }

    fn fetch_locations(&mut self) -> Result<Vec<ReferenceRecord>, TargetError> {
        self.fetch(ReferenceCollection::Locations, &self.locations)
    }

    fn fetch_currencies(&mut self) -> Result<Vec<CurrencyRecord>, TargetError> {
        self.fetch(ReferenceCollection::Currencies, &self.currencies)
    }

    fn post_journal_entry(
        &mut self,
        payload: &serde_json::Value,
    ) -> Result<PostResponse, TargetError> {
        let external_id = payload["externalId"].as_str().map(str::to_string);

        if let Some(message) = external_id
            .as_deref()
            .and_then(|id| self.post_failures.get(id))
        {
            return Err(TargetError::post_failed(
                external_id.as_deref().unwrap_or_default(),
                message.as_str(),
            ));
        }

        self.posted.push(payload.clone());
        Ok(PostResponse::accepted(external_id))
    }
}
