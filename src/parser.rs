//! Sender extraction and lead candidate construction

use crate::scanner::{PersonalDomains, scan_company_mention};
use crate::types::{LeadCandidate, LeadStatus, ParsedSender, PersonName, RawEmail};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Forwarded messages quote the original headers in client-specific ways:
// "From: ...", "> From: ..." and Gmail's emphasized "*From:* ...". Later
// From lines belong to quoted history, so only the first one counts.
static FROM_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^[> \t]*\*?from:\*?[ \t]*(.+)$").unwrap());

// Ordered From-value matchers, first match wins
static NAME_ADDR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*"?([^"<>]+?)"?\s*<\s*([^<>\s]+@[^<>\s]+?)\s*>"#).unwrap()
});

static ANGLE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<\s*([^<>\s]+@[^<>\s]+?)\s*>").unwrap());

static BARE_ADDR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+)").unwrap());

// Standard address grammar: local@domain with a dot-containing domain
static VALID_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Extract the sender from raw header text.
///
/// Binds to the first `From` line in document order (the outermost forward),
/// then tries the ordered matcher list against its value:
/// `Name <email>`, `<email>`, bare address.
#[must_use]
pub fn extract_sender(header_text: &str) -> Option<ParsedSender> {
    let value = FROM_LINE
        .captures(header_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())?;

    if let Some(caps) = NAME_ADDR.captures(value) {
        let name = PersonName::parse(&caps[1]);
        return Some(sender_for(&caps[2], Some(name)));
    }

    if let Some(caps) = ANGLE_ONLY.captures(value) {
        return Some(sender_for(&caps[1], None));
    }

    if let Some(caps) = BARE_ADDR.captures(value) {
        return Some(sender_for(&caps[1], None));
    }

    None
}

fn sender_for(email: &str, name: Option<PersonName>) -> ParsedSender {
    let domain = email
        .split_once('@')
        .map(|(_, d)| d.to_lowercase())
        .unwrap_or_default();

    ParsedSender {
        name,
        email: email.to_string(),
        domain,
    }
}

/// Infer a display name from an address local part.
///
/// Splits on non-alphabetic separators (digits count as boundaries),
/// title-cases each token and joins with single spaces. Single-character
/// locals and locals without alphabetic tokens yield no name rather than a
/// fabricated one.
#[must_use]
pub fn infer_name(local_part: &str) -> Option<PersonName> {
    if local_part.chars().count() <= 1 {
        return None;
    }

    let tokens: Vec<String> = local_part
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| !t.is_empty())
        .map(title_case)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    let last = if tokens.len() > 1 {
        Some(tokens[1..].join(" "))
    } else {
        None
    };

    Some(PersonName {
        full: tokens.join(" "),
        first: Some(tokens[0].clone()),
        last,
    })
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Whether an address matches the grammar required for a valid lead
#[must_use]
pub fn is_valid_address(email: &str) -> bool {
    VALID_ADDRESS.is_match(email)
}

/// Build a normalized lead candidate from a raw email.
///
/// This is the single decision point gating persistence: only a `Parsed`
/// candidate may reach the store. The body is scanned for a company mention
/// only when the sender's domain is a known personal provider; a corporate
/// domain is its own company signal.
#[must_use]
pub fn parse_lead(raw: &RawEmail, personal_domains: &PersonalDomains) -> LeadCandidate {
    let Some(sender) = extract_sender(&raw.header_text) else {
        debug!("no From pattern matched the header block");
        return LeadCandidate::invalid("no parseable From address found");
    };

    if !is_valid_address(&sender.email) {
        debug!(email = %sender.email, "extracted address fails the address grammar");
        return LeadCandidate::invalid(format!(
            "extracted address '{}' is not a valid email address",
            sender.email
        ));
    }

    let name = sender
        .name
        .clone()
        .or_else(|| infer_name(sender.local_part()));

    let company_name = if personal_domains.contains(&sender.domain) {
        scan_company_mention(&raw.body_text)
    } else {
        None
    };

    debug!(
        email = %sender.email,
        domain = %sender.domain,
        company = company_name.as_deref().unwrap_or("-"),
        "parsed lead candidate"
    );

    LeadCandidate {
        first_name: name.as_ref().and_then(|n| n.first.clone()),
        last_name: name.as_ref().and_then(|n| n.last.clone()),
        email: sender.email,
        company_name,
        domain: sender.domain,
        status: LeadStatus::Parsed,
        message: "parsed".to_string(),
    }
}
