use lead_intake::*;

// --- PersonName ---

#[test]
fn test_person_name_full() {
    let name = PersonName::parse("John Doe");
    assert_eq!(name.full, "John Doe");
    assert_eq!(name.first.as_deref(), Some("John"));
    assert_eq!(name.last.as_deref(), Some("Doe"));
}

#[test]
fn test_person_name_single() {
    let name = PersonName::parse("Madonna");
    assert_eq!(name.full, "Madonna");
    assert_eq!(name.first.as_deref(), Some("Madonna"));
    assert!(name.last.is_none());
}

#[test]
fn test_person_name_three_parts_keeps_full_last() {
    let name = PersonName::parse("Ana Maria Silva");
    assert_eq!(name.first.as_deref(), Some("Ana"));
    assert_eq!(name.last.as_deref(), Some("Maria Silva"));
}

#[test]
fn test_person_name_quoted() {
    let name = PersonName::parse("\"John Doe\"");
    assert_eq!(name.full, "John Doe");
}

#[test]
fn test_person_name_display() {
    assert_eq!(PersonName::parse("Alice Smith").to_string(), "Alice Smith");
}

// --- address grammar ---

#[test]
fn test_is_valid_address() {
    let cases = [
        ("john@example.com", true),
        ("John.Doe@Example.COM", true),
        ("a+b@sub.domain.example", true),
        ("root@localhost", false),
        ("not-an-email", false),
        ("", false),
        ("spaced out@example.com", false),
    ];
    for (addr, expected) in cases {
        assert_eq!(is_valid_address(addr), expected, "{addr}");
    }
}

// --- candidates ---

#[test]
fn test_invalid_candidate_carries_diagnostic() {
    let candidate = LeadCandidate::invalid("no parseable From address found");
    assert_eq!(candidate.status, LeadStatus::Invalid);
    assert!(!candidate.is_parsed());
    assert_eq!(candidate.message, "no parseable From address found");
    assert!(candidate.email.is_empty());
}

#[test]
fn test_company_candidate_from_lead() {
    let raw = RawEmail::new(
        "From: m.chen88@gmail.com",
        "VP of Ops at **Acme Corporation**.",
    );
    let lead = parse_lead(&raw, &PersonalDomains::default());
    let company = CompanyCandidate::from_lead(&lead);

    assert_eq!(company.name.as_deref(), Some("Acme Corporation"));
    assert_eq!(company.domain, "gmail.com");
    assert!(company.logo_url.is_none());
}

#[test]
fn test_new_lead_from_candidate() {
    let raw = RawEmail::new("From: Jane Roe <jane@acme.io>", "");
    let candidate = parse_lead(&raw, &PersonalDomains::default());
    let new_lead = NewLead::from_candidate(&candidate);

    assert_eq!(new_lead.email, "jane@acme.io");
    assert_eq!(new_lead.first_name.as_deref(), Some("Jane"));
    assert_eq!(new_lead.last_name.as_deref(), Some("Roe"));
}

// --- ids ---

#[test]
fn test_id_display() {
    assert_eq!(LeadId(7).to_string(), "7");
    assert_eq!(CompanyId(12).to_string(), "12");
}

#[test]
fn test_parsed_sender_local_part() {
    let sender = extract_sender("From: <john.doe@example.com>").unwrap();
    assert_eq!(sender.local_part(), "john.doe");
}
