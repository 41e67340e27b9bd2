//! Per-email orchestration
//!
//! One inbound email is one sequential unit of work walking an explicit
//! state machine:
//!
//! ```text
//! Received -> Rejected                                  (invalid candidate)
//! Received -> Parsed -> LeadDuplicate                   (email already known)
//! Received -> Parsed -> LeadInserted -> CompanyResolved -> Linked
//! ```
//!
//! Any store error that is not a uniqueness violation aborts the run and is
//! surfaced to the caller as `Err` (the `Failed` terminal). The terminal
//! outcome lets the host file the source email into its processed or failed
//! bucket.

use crate::error::{IntakeError, Result};
use crate::lookup::CompanyLookup;
use crate::parser::parse_lead;
use crate::resolver::CompanyResolver;
use crate::scanner::PersonalDomains;
use crate::store::LeadStore;
use crate::types::{Company, CompanyCandidate, Lead, NewLead, RawEmail};
use tracing::{debug, info};

/// Pipeline states for one inbound email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Received,
    Parsed,
    Rejected,
    LeadInserted,
    LeadDuplicate,
    CompanyResolved,
    Linked,
    Failed,
}

/// Terminal result of processing one email.
///
/// `Rejected` and `Duplicate` are non-error terminals with no (new) store
/// rows; `Linked` carries the persisted pair. Fatal store errors arrive as
/// `Err(IntakeError)` instead.
#[derive(Debug, Clone)]
pub enum IntakeOutcome {
    /// The email had no usable sender; nothing was written
    Rejected { message: String },

    /// A lead with this email already exists; intentionally a no-op
    Duplicate { email: String },

    /// Lead persisted and linked to its resolved company
    Linked { lead: Lead, company: Company },
}

impl IntakeOutcome {
    /// The state-machine terminal this outcome corresponds to
    #[must_use]
    pub const fn state(&self) -> IntakeState {
        match self {
            Self::Rejected { .. } => IntakeState::Rejected,
            Self::Duplicate { .. } => IntakeState::LeadDuplicate,
            Self::Linked { .. } => IntakeState::Linked,
        }
    }
}

/// Drives one email through parse, insert, resolve and link
pub struct LeadPersistenceCoordinator<'a, S, L>
where
    S: LeadStore + ?Sized,
    L: CompanyLookup + ?Sized,
{
    store: &'a S,
    lookup: &'a L,
    personal_domains: PersonalDomains,
}

impl<'a, S, L> LeadPersistenceCoordinator<'a, S, L>
where
    S: LeadStore + ?Sized,
    L: CompanyLookup + ?Sized,
{
    pub const fn new(store: &'a S, lookup: &'a L, personal_domains: PersonalDomains) -> Self {
        Self {
            store,
            lookup,
            personal_domains,
        }
    }

    /// Process one raw email to a terminal outcome.
    ///
    /// Invalid candidates short-circuit before any store mutation. A
    /// duplicate lead insert terminates as an idempotent no-op; the existing
    /// row is deliberately not re-fetched or re-linked.
    pub fn process(&self, raw: &RawEmail) -> Result<IntakeOutcome> {
        let mut state = IntakeState::Received;
        debug!(?state, "processing inbound email");

        let candidate = parse_lead(raw, &self.personal_domains);
        if !candidate.is_parsed() {
            state = IntakeState::Rejected;
            info!(?state, message = %candidate.message, "email rejected");
            return Ok(IntakeOutcome::Rejected {
                message: candidate.message,
            });
        }
        state = IntakeState::Parsed;
        debug!(?state, email = %candidate.email, "candidate parsed");

        let lead = match self.store.insert_lead(&NewLead::from_candidate(&candidate)) {
            Ok(lead) => lead,
            Err(e) if e.is_duplicate() => {
                state = IntakeState::LeadDuplicate;
                info!(?state, email = %candidate.email, "lead already exists");
                return Ok(IntakeOutcome::Duplicate {
                    email: candidate.email,
                });
            }
            Err(e) => return Err(fail(e)),
        };
        state = IntakeState::LeadInserted;
        debug!(?state, lead_id = %lead.id, "lead inserted");

        let resolver = CompanyResolver::new(self.lookup);
        let company = resolver
            .resolve(self.store, CompanyCandidate::from_lead(&candidate))
            .map_err(fail)?;
        state = IntakeState::CompanyResolved;
        debug!(?state, company_id = %company.id, domain = %company.domain, "company resolved");

        self.store
            .link_lead_company(lead.id, company.id)
            .map_err(fail)?;
        state = IntakeState::Linked;
        info!(?state, lead_id = %lead.id, company_id = %company.id, "lead linked");

        let lead = Lead {
            company_id: Some(company.id),
            ..lead
        };

        Ok(IntakeOutcome::Linked { lead, company })
    }
}

fn fail(error: IntakeError) -> IntakeError {
    let state = IntakeState::Failed;
    info!(?state, error = %error, "intake failed");
    error
}
