//! Error types for the lead intake pipeline

use thiserror::Error;

/// Errors that can occur while parsing, enriching or persisting a lead.
///
/// The variants mirror how the pipeline recovers from each failure:
/// `Parse` rejects the email before any store write, `Enrichment` degrades
/// to a domain-only company, `DuplicateKey` is an expected outcome of the
/// uniqueness constraints, and `Store` is fatal for the current email.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// No sender address could be extracted from the headers
    #[error("no parseable From address found: {0}")]
    Parse(String),

    /// The company suggestion lookup failed or timed out
    #[error("company lookup failed: {0}")]
    Enrichment(String),

    /// A uniqueness constraint rejected an insert
    #[error("duplicate {entity} for key {key}")]
    DuplicateKey { entity: &'static str, key: String },

    /// Any other persistence failure
    #[error("store operation failed: {0}")]
    Store(String),
}

impl IntakeError {
    /// Whether this error is a uniqueness violation rather than a real
    /// store failure.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}

/// Result type for lead intake operations
pub type Result<T> = std::result::Result<T, IntakeError>;
