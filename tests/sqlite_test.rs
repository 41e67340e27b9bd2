use lead_intake::{
    IntakeOutcome, LeadPersistenceCoordinator, LeadStore, NewCompany, NewLead, NoLookup,
    PersonalDomains, RawEmail, SqliteStore,
};

fn new_lead(email: &str) -> NewLead {
    NewLead {
        email: email.to_string(),
        first_name: Some("Jane".to_string()),
        last_name: Some("Roe".to_string()),
    }
}

fn new_company(domain: &str) -> NewCompany {
    NewCompany {
        name: Some("Acme Corporation".to_string()),
        domain: domain.to_string(),
        logo_url: None,
    }
}

#[test]
fn test_insert_and_select_company() {
    let store = SqliteStore::open_in_memory().unwrap();

    let created = store.insert_company(&new_company("acme.com")).unwrap();
    let found = store.find_company_by_domain("acme.com").unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.name.as_deref(), Some("Acme Corporation"));
    assert!(found.description.is_none());
    assert!(store.find_company_by_domain("other.example").unwrap().is_none());
}

#[test]
fn test_duplicate_lead_email_classified() {
    let store = SqliteStore::open_in_memory().unwrap();

    store.insert_lead(&new_lead("jane@acme.com")).unwrap();
    let err = store.insert_lead(&new_lead("jane@acme.com")).unwrap_err();

    assert!(err.is_duplicate());
}

#[test]
fn test_duplicate_lead_email_case_insensitive() {
    let store = SqliteStore::open_in_memory().unwrap();

    store.insert_lead(&new_lead("jane@acme.com")).unwrap();
    let err = store.insert_lead(&new_lead("Jane@ACME.com")).unwrap_err();

    assert!(err.is_duplicate());
}

#[test]
fn test_duplicate_company_domain_classified() {
    let store = SqliteStore::open_in_memory().unwrap();

    store.insert_company(&new_company("acme.com")).unwrap();
    let err = store.insert_company(&new_company("acme.com")).unwrap_err();

    assert!(err.is_duplicate());
}

#[test]
fn test_link_lead_to_company() {
    let store = SqliteStore::open_in_memory().unwrap();

    let lead = store.insert_lead(&new_lead("jane@acme.com")).unwrap();
    let company = store.insert_company(&new_company("acme.com")).unwrap();

    store.link_lead_company(lead.id, company.id).unwrap();
}

#[test]
fn test_link_missing_lead_is_store_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    let company = store.insert_company(&new_company("acme.com")).unwrap();

    let err = store
        .link_lead_company(lead_intake::LeadId(999), company.id)
        .unwrap_err();

    assert!(!err.is_duplicate());
}

#[test]
fn test_pipeline_over_sqlite() {
    let store = SqliteStore::open_in_memory().unwrap();
    let coordinator =
        LeadPersistenceCoordinator::new(&store, &NoLookup, PersonalDomains::default());

    let raw = RawEmail::new(
        "From: Jane Roe <jane@acme-widgets.com>",
        "Interested in an enterprise plan.",
    );

    let first = coordinator.process(&raw).unwrap();
    let IntakeOutcome::Linked { lead, company } = first else {
        panic!("expected Linked, got {first:?}");
    };
    assert_eq!(lead.company_id, Some(company.id));

    let second = coordinator.process(&raw).unwrap();
    assert!(matches!(second, IntakeOutcome::Duplicate { .. }));

    // The company row is reused on the next lead from the same domain.
    let third = coordinator
        .process(&RawEmail::new(
            "From: <ops@acme-widgets.com>",
            "Following up for Jane.",
        ))
        .unwrap();
    let IntakeOutcome::Linked { company: reused, .. } = third else {
        panic!("expected Linked");
    };
    assert_eq!(reused.id, company.id);
}
