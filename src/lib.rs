// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Sales-inquiry lead intake
//!
//! Parses forwarded sales-inquiry emails into normalized lead records,
//! resolves the lead's company against an external suggestion lookup, and
//! persists both with deduplication and referential linking.
//!
//! # Pipeline
//!
//! - Header extraction: ordered From-pattern matchers, outermost forward wins
//! - Name inference from the address local part when headers carry no name
//! - Company mention scanning for senders on personal provider domains
//! - Company resolution: best-effort enrichment, domain-keyed upsert
//! - Persistence coordination with idempotent duplicate handling
//!
//! # Example
//!
//! ```rust
//! use lead_intake::{
//!     IntakeOutcome, LeadPersistenceCoordinator, MemoryStore, NoLookup,
//!     PersonalDomains, RawEmail,
//! };
//!
//! let store = MemoryStore::new();
//! let coordinator =
//!     LeadPersistenceCoordinator::new(&store, &NoLookup, PersonalDomains::default());
//!
//! let raw = RawEmail::new(
//!     "From: Jane Roe <jane.roe@acme-widgets.com>",
//!     "Hi, we are interested in an enterprise plan.",
//! );
//!
//! let outcome = coordinator.process(&raw).unwrap();
//! assert!(matches!(outcome, IntakeOutcome::Linked { .. }));
//! ```

mod coordinator;
mod error;
mod lookup;
mod parser;
mod resolver;
mod scanner;
mod sqlite;
mod store;
mod types;

pub use coordinator::{IntakeOutcome, IntakeState, LeadPersistenceCoordinator};
pub use error::{IntakeError, Result};
pub use lookup::{
    CompanyLookup, CompanySuggestion, DEFAULT_LOOKUP_TIMEOUT, HttpCompanyLookup, NoLookup,
};
pub use parser::{extract_sender, infer_name, is_valid_address, parse_lead};
pub use resolver::CompanyResolver;
pub use scanner::{PersonalDomains, scan_company_mention};
pub use sqlite::SqliteStore;
pub use store::{LeadStore, MemoryStore};
pub use types::{
    Company, CompanyCandidate, CompanyId, Lead, LeadCandidate, LeadId, LeadStatus, NewCompany,
    NewLead, ParsedSender, PersonName, RawEmail,
};
