use lead_intake::{PersonalDomains, scan_company_mention};

// --- personal domain set ---

#[test]
fn test_default_personal_domains() {
    let domains = PersonalDomains::default();
    for d in ["gmail.com", "outlook.com", "yahoo.com", "hotmail.com"] {
        assert!(domains.contains(d), "{d} should be personal");
    }
    assert!(!domains.contains("innovate.tech"));
    assert!(!domains.contains("acme.com"));
}

#[test]
fn test_personal_domains_case_insensitive() {
    let domains = PersonalDomains::default();
    assert!(domains.contains("Gmail.COM"));
}

#[test]
fn test_personal_domains_extensible_without_code_change() {
    let mut domains = PersonalDomains::default();
    assert!(!domains.contains("corp-mail.example"));

    domains.insert("Corp-Mail.example");
    assert!(domains.contains("corp-mail.example"));
}

#[test]
fn test_personal_domains_from_config_list() {
    let json = r#"["gmail.com", "Web.DE"]"#;
    let domains: PersonalDomains = serde_json::from_str(json).unwrap();

    assert_eq!(domains.len(), 2);
    assert!(domains.contains("web.de"));
    assert!(!domains.contains("yahoo.com"));
}

// --- mention scanning ---

#[test]
fn test_scan_bold_mention() {
    let body = "Hi, I'm the VP of Ops at **Acme Corporation**. We need 50 seats.";
    assert_eq!(
        scan_company_mention(body).as_deref(),
        Some("Acme Corporation")
    );
}

#[test]
fn test_scan_single_star_emphasis() {
    let body = "I head procurement at *Initech* these days.";
    assert_eq!(scan_company_mention(body).as_deref(), Some("Initech"));
}

#[test]
fn test_scan_plain_mention_stops_at_sentence_end() {
    let body = "I work at Globex Industries. Call me any time.";
    assert_eq!(
        scan_company_mention(body).as_deref(),
        Some("Globex Industries")
    );
}

#[test]
fn test_scan_plain_mention_stops_at_line_break() {
    let body = "We met at Hooli\nlast week at the expo";
    assert_eq!(scan_company_mention(body).as_deref(), Some("Hooli"));
}

#[test]
fn test_scan_plain_mention_does_not_swallow_lowercase_tail() {
    let body = "I'm at Stark Industries looking for a vendor";
    assert_eq!(
        scan_company_mention(body).as_deref(),
        Some("Stark Industries")
    );
}

#[test]
fn test_scan_first_mention_in_document_order() {
    let body = "Currently at Umbrella Labs, though I used to be at **Wayne Enterprises**.";
    assert_eq!(
        scan_company_mention(body).as_deref(),
        Some("Umbrella Labs")
    );
}

#[test]
fn test_scan_bold_wins_position_tie() {
    let body = "Our team at **Cyberdyne Systems** is evaluating options.";
    assert_eq!(
        scan_company_mention(body).as_deref(),
        Some("Cyberdyne Systems")
    );
}

#[test]
fn test_scan_no_mention() {
    assert!(scan_company_mention("Just wanted to say hello.").is_none());
    assert!(scan_company_mention("").is_none());
}

#[test]
fn test_scan_mention_requires_capitalized_company() {
    assert!(scan_company_mention("we met at the airport yesterday").is_none());
}

#[test]
fn test_scan_bounded_capture() {
    // A mention longer than the bound must not swallow the whole line.
    let body = "at One Two Three Four Five Six Seven Eight";
    let mention = scan_company_mention(body).unwrap();
    assert_eq!(mention, "One Two Three Four Five Six");
}
