//! Reference index
//!
//! This module builds the read-only lookup tables used to resolve the
//! human-readable values of an input row into ledger references.
//!
//! Keys per collection:
//! - Accounts by exact account number
//! - Classifications and Departments by every `" - "` separated token of
//!   their name, so `"Parent - Child"` is reachable through `"Parent"` and
//!   through `"Child"`
//! - Locations by exact name
//! - Currencies by symbol
//!
//! When several records share a key the first one in collection order wins.
//! Records without an internal id cannot be referenced and are not indexed.
//!
//! A collection that failed to load is absent: every lookup against it
//! answers `None`, exactly like an unknown key.

use crate::core::traits::{LedgerClient, ReferenceCollection};
use crate::types::{AccountRecord, CurrencyRecord, RecordRef, ReferenceRecord, TargetError};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Separator between the segments of a hierarchical label
pub const TOKEN_SEPARATOR: &str = " - ";

/// Raw collections as returned by the ledger
///
/// `None` marks a collection whose fetch failed.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCollections {
    pub accounts: Option<Vec<AccountRecord>>,
    pub classifications: Option<Vec<ReferenceRecord>>,
    pub departments: Option<Vec<ReferenceRecord>>,
    pub locations: Option<Vec<ReferenceRecord>>,
    pub currencies: Option<Vec<CurrencyRecord>>,
}

impl ReferenceCollections {
    /// Fetch every collection once
    ///
    /// Each fetch is attempted regardless of how the others went. A failed
    /// fetch is logged as a warning and leaves that collection absent.
    /// No retries are made here.
    pub fn fetch(client: &mut dyn LedgerClient) -> Self {
        info!("Reading reference data from the ledger");

        let mut collections = ReferenceCollections::default();
        for collection in ReferenceCollection::ALL {
            match collection {
                ReferenceCollection::Accounts => {
                    collections.accounts = recover(collection, client.fetch_accounts())
                }
                ReferenceCollection::Classifications => {
                    collections.classifications =
                        recover(collection, client.fetch_classifications())
                }
                ReferenceCollection::Departments => {
                    collections.departments = recover(collection, client.fetch_departments())
                }
                ReferenceCollection::Locations => {
                    collections.locations = recover(collection, client.fetch_locations())
                }
                ReferenceCollection::Currencies => {
                    collections.currencies = recover(collection, client.fetch_currencies())
                }
            }
        }
        collections
    }
}

fn recover<T>(
    collection: ReferenceCollection,
    result: Result<Vec<T>, TargetError>,
) -> Option<Vec<T>> {
    match result {
        Ok(records) => {
            info!(
                collection = collection.name(),
                count = records.len(),
                "Loaded reference collection"
            );
            Some(records)
        }
        Err(TargetError::ReferenceFetch { message, .. }) => {
            warn!(
                "{}",
                TargetError::reference_fetch(collection.name(), &message)
            );
            None
        }
        Err(other) => {
            warn!(
                "{}",
                TargetError::reference_fetch(collection.name(), &other.to_string())
            );
            None
        }
    }
}

/// An indexed account together with its default subsidiary
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    pub reference: RecordRef,
    /// First usable entry of the account's subsidiary list
    pub default_subsidiary: Option<RecordRef>,
}

/// Key to zero-or-more records, first inserted first
#[derive(Debug, Clone)]
struct Lookup<T> {
    entries: HashMap<String, Vec<T>>,
}

impl<T> Lookup<T> {
    fn new() -> Self {
        Lookup {
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, value: T) {
        self.entries.entry(key.to_string()).or_default().push(value);
    }

    fn first(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|values| values.first())
    }
}

/// Read-only lookup tables over the five reference collections
///
/// Built once per run and shared by every assembly.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    accounts: Option<Lookup<ResolvedAccount>>,
    classifications: Option<Lookup<RecordRef>>,
    departments: Option<Lookup<RecordRef>>,
    locations: Option<Lookup<RecordRef>>,
    currencies: Option<Lookup<RecordRef>>,
}

impl ReferenceIndex {
    /// Fetch all collections through `client` and index them
    pub fn load(client: &mut dyn LedgerClient) -> Self {
        Self::build(&ReferenceCollections::fetch(client))
    }

    /// Index already-fetched collections
    pub fn build(collections: &ReferenceCollections) -> Self {
        ReferenceIndex {
            accounts: collections.accounts.as_deref().map(index_accounts),
            classifications: collections
                .classifications
                .as_deref()
                .map(|records| index_by_token(ReferenceCollection::Classifications, records)),
            departments: collections
                .departments
                .as_deref()
                .map(|records| index_by_token(ReferenceCollection::Departments, records)),
            locations: collections.locations.as_deref().map(index_locations),
            currencies: collections.currencies.as_deref().map(index_currencies),
        }
    }

    /// Whether `collection` loaded successfully
    pub fn contains(&self, collection: ReferenceCollection) -> bool {
        match collection {
            ReferenceCollection::Accounts => self.accounts.is_some(),
            ReferenceCollection::Classifications => self.classifications.is_some(),
            ReferenceCollection::Departments => self.departments.is_some(),
            ReferenceCollection::Locations => self.locations.is_some(),
            ReferenceCollection::Currencies => self.currencies.is_some(),
        }
    }

    pub fn account(&self, account_number: &str) -> Option<&ResolvedAccount> {
        self.accounts.as_ref()?.first(account_number)
    }

    pub fn classification(&self, label: &str) -> Option<&RecordRef> {
        self.classifications.as_ref()?.first(label)
    }

    pub fn department(&self, label: &str) -> Option<&RecordRef> {
        self.departments.as_ref()?.first(label)
    }

    pub fn location(&self, name: &str) -> Option<&RecordRef> {
        self.locations.as_ref()?.first(name)
    }

    pub fn currency(&self, symbol: &str) -> Option<&RecordRef> {
        self.currencies.as_ref()?.first(symbol)
    }
}

fn index_accounts(records: &[AccountRecord]) -> Lookup<ResolvedAccount> {
    let mut lookup = Lookup::new();
    for record in records {
        let (Some(number), Some(reference)) = (record.acct_number.as_deref(), record.to_ref())
        else {
            debug!(
                collection = ReferenceCollection::Accounts.name(),
                acct_number = ?record.acct_number,
                "Skipping unusable reference record"
            );
            continue;
        };
        lookup.insert(
            number,
            ResolvedAccount {
                reference,
                default_subsidiary: record.default_subsidiary(),
            },
        );
    }
    lookup
}

fn index_by_token(collection: ReferenceCollection, records: &[ReferenceRecord]) -> Lookup<RecordRef> {
    let mut lookup = Lookup::new();
    for record in records {
        let (Some(name), Some(reference)) = (record.name.as_deref(), record.to_ref()) else {
            debug!(collection = collection.name(), name = ?record.name, "Skipping unusable reference record");
            continue;
        };
        let mut seen: Vec<&str> = Vec::new();
        for token in name.split(TOKEN_SEPARATOR) {
            if !seen.contains(&token) {
                seen.push(token);
                lookup.insert(token, reference.clone());
            }
        }
    }
    lookup
}

fn index_locations(records: &[ReferenceRecord]) -> Lookup<RecordRef> {
    let mut lookup = Lookup::new();
    for record in records {
        if let (Some(name), Some(reference)) = (record.name.as_deref(), record.to_ref()) {
            lookup.insert(name, reference);
        }
    }
    lookup
}

fn index_currencies(records: &[CurrencyRecord]) -> Lookup<RecordRef> {
    let mut lookup = Lookup::new();
    for record in records {
        if let (Some(symbol), Some(reference)) = (record.symbol.as_deref(), record.to_ref()) {
            lookup.insert(symbol, reference);
        }
    }
    lookup
}
