use court_core::audit::event::{finalize_event, Actor, CaseEvent, ZERO_HASH_64};
use court_core::audit::journal::{read_events, verify_chain, CaseJournal};
use serde_json::json;

fn event(event_type: &str) -> CaseEvent {
    CaseEvent::new(
        "2026-02-10T00:00:00Z",
        event_type,
        "CC-61FD7D-TEST",
        Actor::System,
        json!({"selected_count": 4}),
    )
}

#[test]
fn event_hash_is_stable() {
    let mut ev = event("VERDICT_RENDERED");
    ev.prev_event_hash = ZERO_HASH_64.to_string();
    let a = finalize_event(ev.clone()).unwrap().event_hash;
    let b = finalize_event(ev).unwrap().event_hash;
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn unknown_event_types_are_rejected() {
    let mut ev = event("RUN_CREATED");
    ev.prev_event_hash = ZERO_HASH_64.to_string();
    assert!(finalize_event(ev).is_err());

    let dir = tempfile::tempdir().unwrap();
    let mut journal = CaseJournal::open_or_create(dir.path().join("j.ndjson")).unwrap();
    assert!(journal.append(event("NOT_A_THING")).is_err());
    assert!(journal.append(event("CASE_FILED")).is_ok());
}

#[test]
fn reopening_resumes_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.ndjson");
    let first_hash = {
        let mut journal = CaseJournal::open_or_create(&path).unwrap();
        assert_eq!(journal.last_hash(), ZERO_HASH_64);
        journal.append(event("CASE_FILED")).unwrap().event_hash
    };

    let mut journal = CaseJournal::open_or_create(&path).unwrap();
    assert_eq!(journal.last_hash(), first_hash);
    let second = journal.append(event("CASE_SAVED")).unwrap();
    assert_eq!(second.prev_event_hash, first_hash);

    let report = verify_chain(&path).unwrap();
    assert!(report.is_intact());
    assert_eq!(report.events, 2);
}

#[test]
fn tampering_is_located() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.ndjson");
    let mut journal = CaseJournal::open_or_create(&path).unwrap();
    for t in ["CASE_FILED", "CHARGE_SELECTED", "VERDICT_RENDERED"] {
        journal.append(event(t)).unwrap();
    }

    let mut events = read_events(&path).unwrap();
    events[1].details = json!({"selected_count": 9});
    let body: String = events
        .iter()
        .map(|e| format!("{}\n", serde_json::to_string(e).unwrap()))
        .collect();
    std::fs::write(&path, body).unwrap();

    let report = verify_chain(&path).unwrap();
    assert_eq!(report.events, 3);
    assert_eq!(report.first_broken_line, Some(2));
}
