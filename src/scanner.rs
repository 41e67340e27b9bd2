//! Company mention scanning for personal-domain senders

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

// Emphasized form: "at *Acme Corp*" / "at **Acme Corp**". Bounded capture,
// never crossing a line break.
static BOLD_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bat[ \t]+\*{1,2}([^*\r\n]{1,60}?)\*{1,2}").unwrap()
});

// Plain form: "at Acme Corp". A run of capitalized tokens, at most six, so
// the capture stops before unrelated trailing sentence text.
static PLAIN_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?i:at)[ \t]+([A-Z][A-Za-z0-9&'-]*(?:[ \t][A-Z0-9][A-Za-z0-9&'-]*){0,5})",
    )
    .unwrap()
});

/// The set of email provider domains used by individuals rather than a
/// specific business.
///
/// Injectable configuration: hosts extend or replace the default list
/// without code change, and may deserialize it straight from their own
/// config file as a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct PersonalDomains(HashSet<String>);

impl PersonalDomains {
    /// Build a set from arbitrary domains; entries are lower-cased
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            domains
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .collect(),
        )
    }

    /// Case-insensitive exact membership test
    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains(&domain.to_lowercase())
    }

    /// Add a provider domain to the set
    pub fn insert(&mut self, domain: impl Into<String>) {
        self.0.insert(domain.into().to_lowercase());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PersonalDomains {
    fn default() -> Self {
        Self::new([
            "gmail.com",
            "googlemail.com",
            "yahoo.com",
            "outlook.com",
            "hotmail.com",
            "live.com",
            "msn.com",
            "protonmail.com",
            "proton.me",
            "icloud.com",
            "aol.com",
            "gmx.com",
        ])
    }
}

impl From<Vec<String>> for PersonalDomains {
    fn from(domains: Vec<String>) -> Self {
        Self::new(domains)
    }
}

/// Scan body text for an explicit "at <Company>" mention.
///
/// Both the emphasized and the plain form are tried; the first match in
/// document order wins, with the emphasized form breaking position ties.
/// Returns `None` when nothing matches.
#[must_use]
pub fn scan_company_mention(body_text: &str) -> Option<String> {
    let bold = BOLD_MENTION.captures(body_text);
    let plain = PLAIN_MENTION.captures(body_text);

    let capture = match (bold, plain) {
        (Some(b), Some(p)) => {
            let b_start = b.get(0).map_or(usize::MAX, |m| m.start());
            let p_start = p.get(0).map_or(usize::MAX, |m| m.start());
            if b_start <= p_start { b } else { p }
        }
        (Some(b), None) => b,
        (None, Some(p)) => p,
        (None, None) => return None,
    };

    let name = capture
        .get(1)?
        .as_str()
        .trim()
        .trim_end_matches(['.', ',', ';', ':', '!', '?'])
        .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
