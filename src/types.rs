//! Core types for the lead intake pipeline

use crate::error::{IntakeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw inbound email, split into header text and body text.
///
/// This is the unit of work delivered by the mailbox-polling collaborator.
/// It is consumed once per processing run and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmail {
    /// Raw header block, one `Key: value` header per line
    pub header_text: String,

    /// Plain text body
    pub body_text: String,
}

impl RawEmail {
    pub fn new(header_text: impl Into<String>, body_text: impl Into<String>) -> Self {
        Self {
            header_text: header_text.into(),
            body_text: body_text.into(),
        }
    }

    /// Build a `RawEmail` from a full RFC 5322 message.
    ///
    /// Convenience for hosts whose poller hands over the raw message rather
    /// than a pre-split header/body pair. Headers are flattened to
    /// `Key: value` lines; the first `text/plain` part wins as the body.
    pub fn from_mime(raw: &[u8]) -> Result<Self> {
        let parsed =
            mailparse::parse_mail(raw).map_err(|e| IntakeError::Parse(e.to_string()))?;

        let header_text = parsed
            .headers
            .iter()
            .map(|h| format!("{}: {}", h.get_key(), h.get_value()))
            .collect::<Vec<_>>()
            .join("\n");

        let mut body_text = String::new();
        collect_plain_text(&parsed, &mut body_text);

        Ok(Self {
            header_text,
            body_text,
        })
    }
}

fn collect_plain_text(parsed: &mailparse::ParsedMail, text: &mut String) {
    if parsed.subparts.is_empty() {
        let content_type = parsed.ctype.mimetype.to_lowercase();
        if text.is_empty()
            && !content_type.contains("text/html")
            && let Ok(body) = parsed.get_body()
        {
            *text = body;
        }
        return;
    }

    for part in &parsed.subparts {
        collect_plain_text(part, text);
    }
}

/// Sender identity extracted from the header block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedSender {
    /// Display name, present only when the From line carried one
    pub name: Option<PersonName>,

    /// Address with original casing preserved
    pub email: String,

    /// Domain part, lower-cased for comparisons
    pub domain: String,
}

impl ParsedSender {
    /// Local part of the address (before `@`)
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or("")
    }
}

/// Parsed person name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonName {
    /// Full name as provided or inferred
    pub full: String,

    /// First name (if parseable)
    pub first: Option<String>,

    /// Last name (if parseable)
    pub last: Option<String>,
}

impl PersonName {
    /// Parse a display-name string
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let s = s.trim().trim_matches('"');
        let parts: Vec<&str> = s.split_whitespace().collect();

        match parts.len() {
            0 => Self {
                full: String::new(),
                first: None,
                last: None,
            },
            1 => Self {
                full: parts[0].to_string(),
                first: Some(parts[0].to_string()),
                last: None,
            },
            _ => Self {
                full: s.to_string(),
                first: Some(parts[0].to_string()),
                last: Some(parts[1..].join(" ")),
            },
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}

/// Validity of a lead candidate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    /// The sender address matched the address grammar
    Parsed,

    /// No usable sender address; nothing may be persisted
    Invalid,
}

/// A normalized lead candidate, the single gate before persistence.
///
/// `status == Parsed` holds iff `email` matched the address grammar.
/// Candidates are transient: built, inspected and dropped within one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCandidate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,

    /// Company name scanned from the body (personal-domain senders only)
    pub company_name: Option<String>,

    /// Sender domain, lower-cased
    pub domain: String,

    pub status: LeadStatus,

    /// Human-readable diagnostic accompanying `status`
    pub message: String,
}

impl LeadCandidate {
    /// Build an invalid candidate carrying only a diagnostic
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            first_name: None,
            last_name: None,
            email: String::new(),
            company_name: None,
            domain: String::new(),
            status: LeadStatus::Invalid,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.status == LeadStatus::Parsed
    }
}

/// An unresolved company identity awaiting reconciliation.
///
/// `domain` is the natural dedup key; `name` may be absent when the only
/// signal is the sender's corporate domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyCandidate {
    pub name: Option<String>,
    pub domain: String,
    pub logo_url: Option<String>,
}

impl CompanyCandidate {
    /// Derive the company candidate from a parsed lead
    #[must_use]
    pub fn from_lead(candidate: &LeadCandidate) -> Self {
        Self {
            name: candidate.company_name.clone(),
            domain: candidate.domain.clone(),
            logo_url: None,
        }
    }
}

/// Identifier of a persisted lead row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LeadId(pub i64);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted company row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CompanyId(pub i64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields for a new lead row; `email` is the unique key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewLead {
    /// Lift the persistable fields out of a parsed candidate
    #[must_use]
    pub fn from_candidate(candidate: &LeadCandidate) -> Self {
        Self {
            email: candidate.email.clone(),
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
        }
    }
}

/// Fields for a new company row; `domain` is the unique key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: Option<String>,
    pub domain: String,
    pub logo_url: Option<String>,
}

/// A persisted lead row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Globally unique
    pub email: String,

    /// Set once the lead is linked to its resolved company
    pub company_id: Option<CompanyId>,
}

/// A persisted company row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: Option<String>,

    /// Globally unique
    pub domain: String,

    /// Reserved for a later enrichment pass; this pipeline never fills it
    pub description: Option<String>,

    pub logo_url: Option<String>,
}
