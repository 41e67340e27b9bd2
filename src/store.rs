//! Persistence abstraction
//!
//! The pipeline consumes exactly four store operations. Uniqueness
//! violations come back as [`IntakeError::DuplicateKey`] so callers can
//! treat the insert race as an expected outcome instead of a failure;
//! anything else maps to [`IntakeError::Store`] and is fatal for the lead
//! being processed.

use crate::error::{IntakeError, Result};
use crate::types::{Company, CompanyId, Lead, LeadId, NewCompany, NewLead};
use chrono::Utc;
use std::sync::Mutex;

/// Relational store consumed by the pipeline.
///
/// Schema invariants the implementation must uphold: `leads.email` unique,
/// `companies.domain` unique, `leads.company_id` references an existing
/// company row. The uniqueness constraints are the only serialization
/// mechanism against concurrent duplicate inserts.
pub trait LeadStore {
    /// Insert a lead row, or fail with `DuplicateKey` on an existing email
    fn insert_lead(&self, lead: &NewLead) -> Result<Lead>;

    /// Look up a company by its domain
    fn find_company_by_domain(&self, domain: &str) -> Result<Option<Company>>;

    /// Insert a company row, or fail with `DuplicateKey` on an existing
    /// domain
    fn insert_company(&self, company: &NewCompany) -> Result<Company>;

    /// Point an existing lead at its resolved company
    fn link_lead_company(&self, lead_id: LeadId, company_id: CompanyId) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryTables {
    leads: Vec<Lead>,
    companies: Vec<Company>,
    next_lead_id: i64,
    next_company_id: i64,
}

/// In-process reference implementation of [`LeadStore`].
///
/// Backs the crate's own tests and serves hosts that want the pipeline
/// without a database. Both uniqueness invariants are enforced; email
/// comparison is case-insensitive, matching the SQLite schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<MemoryTables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted lead rows
    #[must_use]
    pub fn lead_count(&self) -> usize {
        self.tables.lock().map(|t| t.leads.len()).unwrap_or(0)
    }

    /// Number of persisted company rows
    #[must_use]
    pub fn company_count(&self) -> usize {
        self.tables.lock().map(|t| t.companies.len()).unwrap_or(0)
    }

    /// Snapshot of all lead rows
    #[must_use]
    pub fn leads(&self) -> Vec<Lead> {
        self.tables.lock().map(|t| t.leads.clone()).unwrap_or_default()
    }

    /// Snapshot of all company rows
    #[must_use]
    pub fn companies(&self) -> Vec<Company> {
        self.tables
            .lock()
            .map(|t| t.companies.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryTables>> {
        self.tables
            .lock()
            .map_err(|_| IntakeError::Store("memory store mutex poisoned".to_string()))
    }
}

impl LeadStore for MemoryStore {
    fn insert_lead(&self, lead: &NewLead) -> Result<Lead> {
        let mut tables = self.lock()?;

        if tables
            .leads
            .iter()
            .any(|l| l.email.eq_ignore_ascii_case(&lead.email))
        {
            return Err(IntakeError::DuplicateKey {
                entity: "lead",
                key: lead.email.clone(),
            });
        }

        tables.next_lead_id += 1;
        let row = Lead {
            id: LeadId(tables.next_lead_id),
            created_at: Utc::now(),
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            company_id: None,
        };
        tables.leads.push(row.clone());
        Ok(row)
    }

    fn find_company_by_domain(&self, domain: &str) -> Result<Option<Company>> {
        let tables = self.lock()?;
        Ok(tables
            .companies
            .iter()
            .find(|c| c.domain.eq_ignore_ascii_case(domain))
            .cloned())
    }

    fn insert_company(&self, company: &NewCompany) -> Result<Company> {
        let mut tables = self.lock()?;

        if tables
            .companies
            .iter()
            .any(|c| c.domain.eq_ignore_ascii_case(&company.domain))
        {
            return Err(IntakeError::DuplicateKey {
                entity: "company",
                key: company.domain.clone(),
            });
        }

        tables.next_company_id += 1;
        let row = Company {
            id: CompanyId(tables.next_company_id),
            name: company.name.clone(),
            domain: company.domain.clone(),
            description: None,
            logo_url: company.logo_url.clone(),
        };
        tables.companies.push(row.clone());
        Ok(row)
    }

    fn link_lead_company(&self, lead_id: LeadId, company_id: CompanyId) -> Result<()> {
        let mut tables = self.lock()?;

        if !tables.companies.iter().any(|c| c.id == company_id) {
            return Err(IntakeError::Store(format!(
                "cannot link to missing company {company_id}"
            )));
        }

        let lead = tables
            .leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or_else(|| IntakeError::Store(format!("no lead with id {lead_id}")))?;

        lead.company_id = Some(company_id);
        Ok(())
    }
}
