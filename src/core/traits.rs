//! Collaborator trait for the remote ledger
//!
//! The engine never talks to the ledger directly. Reference collections are
//! fetched and entries are posted through [`LedgerClient`], so the transport
//! (SOAP, REST, files on disk, memory in tests) stays outside the core.

use crate::types::{AccountRecord, CurrencyRecord, PostResponse, ReferenceRecord, TargetError};

/// The five reference collections the engine resolves against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceCollection {
    Accounts,
    Classifications,
    Departments,
    Locations,
    Currencies,
}

impl ReferenceCollection {
    pub const ALL: [ReferenceCollection; 5] = [
        ReferenceCollection::Locations,
        ReferenceCollection::Accounts,
        ReferenceCollection::Classifications,
        ReferenceCollection::Currencies,
        ReferenceCollection::Departments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReferenceCollection::Accounts => "Accounts",
            ReferenceCollection::Classifications => "Classifications",
            ReferenceCollection::Departments => "Departments",
            ReferenceCollection::Locations => "Locations",
            ReferenceCollection::Currencies => "Currencies",
        }
    }
}

/// Remote ledger collaborator
///
/// Each fetch is independent: an implementation signals an unavailable
/// collection with `TargetError::ReferenceFetch` and the caller carries on
/// without it. Retries, timeouts and authentication belong to the
/// implementation.
pub trait LedgerClient {
    fn fetch_accounts(&mut self) -> Result<Vec<AccountRecord>, TargetError>;

    fn fetch_classifications(&mut self) -> Result<Vec<ReferenceRecord>, TargetError>;

    fn fetch_departments(&mut self) -> Result<Vec<ReferenceRecord>, TargetError>;

    fn fetch_locations(&mut self) -> Result<Vec<ReferenceRecord>, TargetError>;

    fn fetch_currencies(&mut self) -> Result<Vec<CurrencyRecord>, TargetError>;

    /// Submit one serialized journal entry
    fn post_journal_entry(
        &mut self,
        payload: &serde_json::Value,
    ) -> Result<PostResponse, TargetError>;
}
