//! SQLite-backed [`LeadStore`]

use crate::error::{IntakeError, Result};
use crate::store::LeadStore;
use crate::types::{Company, CompanyId, Lead, LeadId, NewCompany, NewLead};
use chrono::Utc;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS companies (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT,
    domain      TEXT NOT NULL UNIQUE,
    description TEXT,
    logo_url    TEXT
);
CREATE TABLE IF NOT EXISTS leads (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL,
    first_name TEXT,
    last_name  TEXT,
    email      TEXT NOT NULL UNIQUE COLLATE NOCASE,
    company_id INTEGER REFERENCES companies(id)
);
";

/// [`LeadStore`] over a SQLite database.
///
/// The uniqueness constraints on `leads.email` and `companies.domain` do the
/// dedup work; a constraint violation surfaces as
/// [`IntakeError::DuplicateKey`] so the resolver can re-select instead of
/// failing.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and bootstrap) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path).map_err(open_error)?)
    }

    /// Open a private in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().map_err(open_error)?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(open_error)?;
        conn.execute_batch(SCHEMA).map_err(open_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| IntakeError::Store("sqlite connection mutex poisoned".to_string()))
    }
}

fn open_error(e: rusqlite::Error) -> IntakeError {
    IntakeError::Store(format!("cannot open sqlite store: {e}"))
}

/// Map a rusqlite error to the intake taxonomy, classifying uniqueness
/// violations on the given entity/key.
fn store_error(e: &rusqlite::Error, entity: &'static str, key: &str) -> IntakeError {
    if let rusqlite::Error::SqliteFailure(inner, _) = e
        && inner.code == rusqlite::ErrorCode::ConstraintViolation
    {
        return IntakeError::DuplicateKey {
            entity,
            key: key.to_string(),
        };
    }
    IntakeError::Store(e.to_string())
}

impl LeadStore for SqliteStore {
    fn insert_lead(&self, lead: &NewLead) -> Result<Lead> {
        let conn = self.lock()?;
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO leads (created_at, first_name, last_name, email)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                created_at.to_rfc3339(),
                lead.first_name,
                lead.last_name,
                lead.email,
            ],
        )
        .map_err(|e| store_error(&e, "lead", &lead.email))?;

        Ok(Lead {
            id: LeadId(conn.last_insert_rowid()),
            created_at,
            first_name: lead.first_name.clone(),
            last_name: lead.last_name.clone(),
            email: lead.email.clone(),
            company_id: None,
        })
    }

    fn find_company_by_domain(&self, domain: &str) -> Result<Option<Company>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                "SELECT id, name, domain, description, logo_url
                 FROM companies WHERE domain = ?1",
                params![domain],
                |row| {
                    Ok(Company {
                        id: CompanyId(row.get(0)?),
                        name: row.get(1)?,
                        domain: row.get(2)?,
                        description: row.get(3)?,
                        logo_url: row.get(4)?,
                    })
                },
            )
            .map(Some)
            .or_else(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    Ok(None)
                } else {
                    Err(IntakeError::Store(e.to_string()))
                }
            })?;

        Ok(row)
    }

    fn insert_company(&self, company: &NewCompany) -> Result<Company> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO companies (name, domain, logo_url) VALUES (?1, ?2, ?3)",
            params![company.name, company.domain, company.logo_url],
        )
        .map_err(|e| store_error(&e, "company", &company.domain))?;

        Ok(Company {
            id: CompanyId(conn.last_insert_rowid()),
            name: company.name.clone(),
            domain: company.domain.clone(),
            description: None,
            logo_url: company.logo_url.clone(),
        })
    }

    fn link_lead_company(&self, lead_id: LeadId, company_id: CompanyId) -> Result<()> {
        let conn = self.lock()?;

        let updated = conn
            .execute(
                "UPDATE leads SET company_id = ?1 WHERE id = ?2",
                params![company_id.0, lead_id.0],
            )
            .map_err(|e| IntakeError::Store(e.to_string()))?;

        if updated == 1 {
            Ok(())
        } else {
            Err(IntakeError::Store(format!("no lead with id {lead_id}")))
        }
    }
}
