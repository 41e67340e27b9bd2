//! Company suggestion lookup
//!
//! The lookup is best-effort enrichment: a blocking HTTP call with a bounded
//! timeout, returning ranked candidates for a free-text company name. The
//! resolver treats every failure here as recoverable.

use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for a suggestion request
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_ENDPOINT: &str = "https://autocomplete.clearbit.com/v1/companies/suggest";

/// One ranked candidate returned by the suggestion service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanySuggestion {
    pub name: String,

    /// Canonical company domain; typically more authoritative than the
    /// sender-derived one
    pub domain: Option<String>,

    #[serde(rename = "logo")]
    pub logo_url: Option<String>,
}

/// A company-name suggestion service
pub trait CompanyLookup {
    /// Query candidates for a free-text company name, best ranked first
    fn suggest(&self, query: &str) -> Result<Vec<CompanySuggestion>>;
}

/// HTTP client for a Clearbit-style autocomplete endpoint.
///
/// The endpoint takes a `query` parameter and answers with a JSON array of
/// `{name, domain, logo}` objects. No authentication.
pub struct HttpCompanyLookup {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpCompanyLookup {
    /// Client against the default public suggest endpoint
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Client against a custom endpoint with a custom timeout
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpCompanyLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyLookup for HttpCompanyLookup {
    fn suggest(&self, query: &str) -> Result<Vec<CompanySuggestion>> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("query", query)
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    IntakeError::Enrichment(format!("suggest endpoint returned HTTP {code}"))
                }
                ureq::Error::Transport(t) => IntakeError::Enrichment(t.to_string()),
            })?;

        response
            .into_json::<Vec<CompanySuggestion>>()
            .map_err(|e| IntakeError::Enrichment(format!("invalid suggest response: {e}")))
    }
}

/// A lookup that never returns candidates, for offline hosts and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl CompanyLookup for NoLookup {
    fn suggest(&self, _query: &str) -> Result<Vec<CompanySuggestion>> {
        Ok(Vec::new())
    }
}
