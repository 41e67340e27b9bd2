//! Company resolution: enrich, dedup, upsert
//!
//! Reconciles a transient [`CompanyCandidate`] against the suggestion
//! lookup and the store, yielding one canonical persisted company. Stored
//! company metadata is first-write-wins: later enrichments never overwrite
//! an existing row.

use crate::error::Result;
use crate::lookup::CompanyLookup;
use crate::store::LeadStore;
use crate::types::{Company, CompanyCandidate, NewCompany};
use tracing::{debug, warn};

/// Resolves company candidates to canonical persisted rows
pub struct CompanyResolver<'a, L: CompanyLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: CompanyLookup + ?Sized> CompanyResolver<'a, L> {
    pub const fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    /// Resolve a candidate to a single persisted company identity.
    ///
    /// Enrichment is best-effort and never blocks resolution. The domain is
    /// the authoritative dedup key; losing the insert race to a concurrent
    /// writer is handled by re-selecting the winner's row.
    pub fn resolve<S: LeadStore + ?Sized>(
        &self,
        store: &S,
        candidate: CompanyCandidate,
    ) -> Result<Company> {
        let candidate = self.enrich(candidate);

        if let Some(existing) = store.find_company_by_domain(&candidate.domain)? {
            debug!(domain = %existing.domain, id = %existing.id, "company already known");
            return Ok(existing);
        }

        let row = NewCompany {
            name: candidate.name,
            domain: candidate.domain,
            logo_url: candidate.logo_url,
        };

        match store.insert_company(&row) {
            Ok(company) => {
                debug!(domain = %company.domain, id = %company.id, "company created");
                Ok(company)
            }
            Err(e) if e.is_duplicate() => {
                // Concurrent insert for the same domain won; adopt its row.
                store.find_company_by_domain(&row.domain)?.ok_or(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Enrich the candidate from the suggestion lookup when a name is
    /// available. The top suggestion's domain supersedes the locally derived
    /// one; on failure or an empty answer the candidate passes through
    /// unchanged.
    fn enrich(&self, candidate: CompanyCandidate) -> CompanyCandidate {
        let Some(name) = candidate.name.clone() else {
            return candidate;
        };

        match self.lookup.suggest(&name) {
            Ok(suggestions) => match suggestions.into_iter().next() {
                Some(top) => {
                    debug!(query = %name, suggestion = %top.name, "adopting top suggestion");
                    CompanyCandidate {
                        name: Some(top.name),
                        domain: top
                            .domain
                            .map_or(candidate.domain, |d| d.to_lowercase()),
                        logo_url: top.logo_url.or(candidate.logo_url),
                    }
                }
                None => candidate,
            },
            Err(e) => {
                warn!(query = %name, error = %e, "company lookup failed, continuing domain-only");
                candidate
            }
        }
    }
}
