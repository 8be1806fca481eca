use court_core::audit::journal::{read_events, verify_chain, CaseJournal};
use court_core::court::charges::RETRACTION_INDEX;
use court_core::court::defense::{DEFENSE_POOL, DEFENSE_SUFFIX};
use court_core::court::docket::{filter_cases, render_docket_csv, UNDECIDED_LABEL};
use court_core::court::model::VerdictLevel;
use court_core::court::remedies::REMEDIES;
use court_core::court::report::report_file_name;
use court_core::court::verdict::VERDICT_WARN_TEXT;
use court_core::court::workflow::{build_case, Court};
use court_core::error::CoreError;
use court_core::storage::file_store::FileCaseStore;
use court_core::storage::store::{CaseStore, MemoryCaseStore};

const SAMPLE: &str = "这句话的本质是系统升级";

#[test]
fn blank_submission_is_a_no_op() {
    let mut court = Court::new(MemoryCaseStore::new());
    assert!(court.file_case("   ").unwrap().is_none());
    assert!(court.store().list().is_empty());
    assert_eq!(court.store().last_case_id(), None);
}

#[test]
fn filing_persists_and_points_last_case() {
    let mut court = Court::new(MemoryCaseStore::new());
    let case = court.file_case(&format!("  {}  ", SAMPLE)).unwrap().unwrap();
    assert!(case.id.starts_with("CC-61FD7D-"));
    assert_eq!(case.text, SAMPLE);
    assert_eq!(court.case(&case.id), Some(case.clone()));
    assert_eq!(court.last_case(), Some(case.clone()));
    assert_eq!(case.created_at, case.updated_at);
}

#[test]
fn refiling_same_text_never_overwrites_a_case() {
    let mut court = Court::new(MemoryCaseStore::new());
    let first = court.file_case("foo").unwrap().unwrap();
    court
        .select_charge(&first.id, &first.system_charges[0].id, true)
        .unwrap();

    let mut ids = vec![first.id.clone()];
    for _ in 0..50 {
        ids.push(court.file_case("foo").unwrap().unwrap().id);
    }
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 51);
    assert_eq!(court.store().list().len(), 51);
    assert_eq!(court.case(&first.id).unwrap().selected_charge_ids.len(), 1);
}

#[test]
fn court_sees_cases_written_by_another_handle() {
    let dir = tempfile::tempdir().unwrap();
    let mut here = Court::new(FileCaseStore::open(dir.path()).unwrap());
    let mut there = Court::new(FileCaseStore::open(dir.path()).unwrap());

    let theirs = there.file_case("bar").unwrap().unwrap();
    let ours = here.file_case("foo").unwrap().unwrap();
    here.select_charge(&theirs.id, &theirs.system_charges[0].id, true)
        .unwrap();

    let reopened = FileCaseStore::open(dir.path()).unwrap();
    assert!(reopened.get(&ours.id).is_some());
    assert_eq!(reopened.get(&theirs.id).unwrap().selected_charge_ids.len(), 1);
}

#[test]
fn selection_rejects_unknown_ids() {
    let mut court = Court::new(MemoryCaseStore::new());
    let case = court.file_case(SAMPLE).unwrap().unwrap();
    let err = court.select_charge(&case.id, "ch_missing", true).unwrap_err();
    assert!(matches!(err, CoreError::UnknownCharge { .. }));
    let err = court.select_charge("CC-NOPE", "ch_missing", true).unwrap_err();
    assert!(matches!(err, CoreError::CaseNotFound(_)));
}

#[test]
fn custom_charges_are_idempotent_and_prune_selection() {
    let mut court = Court::new(MemoryCaseStore::new());
    let case = court.file_case(SAMPLE).unwrap().unwrap();

    let id = court
        .add_custom_charge(&case.id, "  举证不足  ")
        .unwrap()
        .unwrap();
    assert!(court.add_custom_charge(&case.id, "举证不足").unwrap().is_none());
    assert!(court.add_custom_charge(&case.id, "   ").unwrap().is_none());
    let stored = court.case(&case.id).unwrap();
    assert_eq!(stored.custom_charges.len(), 1);
    assert_eq!(stored.custom_charges[0].text, "举证不足");

    court.select_charge(&case.id, &id, true).unwrap();
    court
        .select_charge(&case.id, &case.system_charges[0].id, true)
        .unwrap();
    assert_eq!(court.case(&case.id).unwrap().selected_charge_ids.len(), 2);

    assert!(court.remove_custom_charge(&case.id, &id).unwrap());
    assert!(!court.remove_custom_charge(&case.id, &id).unwrap());
    // System charges cannot be removed.
    assert!(!court
        .remove_custom_charge(&case.id, &case.system_charges[0].id)
        .unwrap());

    let stored = court.case(&case.id).unwrap();
    assert!(stored.custom_charges.is_empty());
    assert_eq!(
        stored.selected_charge_ids.iter().cloned().collect::<Vec<_>>(),
        vec![case.system_charges[0].id.clone()]
    );
}

#[test]
fn verdict_tracks_current_selection_on_each_entry() {
    let mut court = Court::new(MemoryCaseStore::new());
    let case = court.file_case(SAMPLE).unwrap().unwrap();
    let ids: Vec<String> = case.system_charges.iter().map(|c| c.id.clone()).collect();

    assert_eq!(court.enter_verdict(&case.id).unwrap().verdict_level, VerdictLevel::Good);

    for id in ids.iter().take(4) {
        court.select_charge(&case.id, id, true).unwrap();
    }
    let judged = court.enter_verdict(&case.id).unwrap();
    assert_eq!(judged.verdict_level, VerdictLevel::Warn);
    assert_eq!(judged.verdict_text, VERDICT_WARN_TEXT);
    assert_eq!(court.enter_verdict(&case.id).unwrap().verdict_text, judged.verdict_text);

    for id in ids.iter().skip(4) {
        court.select_charge(&case.id, id, true).unwrap();
    }
    assert_eq!(court.enter_verdict(&case.id).unwrap().verdict_level, VerdictLevel::Bad);

    court.select_charge(&case.id, &ids[0], false).unwrap();
    court.select_charge(&case.id, &ids[1], false).unwrap();
    court.select_charge(&case.id, &ids[2], false).unwrap();
    let judged = court.enter_verdict(&case.id).unwrap();
    assert_eq!(judged.verdict_level, VerdictLevel::Warn);

    // Write-once fields never move.
    assert_eq!(judged.seed, case.seed);
    assert_eq!(judged.system_charges, case.system_charges);
    assert_eq!(judged.evidence, case.evidence);
    assert_eq!(judged.defense, case.defense);
    assert_eq!(judged.created_at, case.created_at);
}

#[test]
fn exported_report_layout_is_exact() {
    let mut court = Court::new(MemoryCaseStore::new());
    let case = court.file_case(SAMPLE).unwrap().unwrap();
    for charge in case.system_charges.iter().take(4) {
        court.select_charge(&case.id, &charge.id, true).unwrap();
    }
    court.enter_verdict(&case.id).unwrap();
    let report = court.export_report(&case.id).unwrap();

    let c = &case.system_charges;
    let expected = format!(
        "CASE {id}\nTEXT:\n{text}\n\nCHARGES (selected):\n- {c0}\n- {c1}\n- {c2}\n- {c3}\n\n\
EVIDENCE (surface):\n- quotes: none\n- abstract: 本质 / 系统 / 升级\n- pivots: none\n\n\
DEFENSE:\n{defense}\n\nVERDICT:\n{verdict}\n\nREMEDIES:\n1. {r0}\n2. {r1}\n3. {r2}\n\n\
NOTE:\nRetractions are preserved. Some references may be missing.\n",
        id = case.id,
        text = SAMPLE,
        c0 = c[0].text,
        c1 = c[1].text,
        c2 = c[2].text,
        c3 = c[RETRACTION_INDEX].text,
        defense = format!("{}{}", DEFENSE_POOL[4], DEFENSE_SUFFIX),
        verdict = VERDICT_WARN_TEXT,
        r0 = REMEDIES[0],
        r1 = REMEDIES[1],
        r2 = REMEDIES[2],
    );
    assert_eq!(report, expected);
    assert!(report.contains(&format!("VERDICT:\n{}\n", VERDICT_WARN_TEXT)));
    assert_eq!(report_file_name(&case), format!("{}.txt", case.id));
}

#[test]
fn report_marks_empty_sections() {
    let case = build_case("plain", "CC-X".to_string(), "2026-02-10T00:00:00Z").unwrap();
    let report = court_core::court::report::render_case_report(&case);
    assert!(report.contains("CHARGES (selected):\n(none)\n"));
    assert!(report.contains("- quotes: none\n- abstract: none\n- pivots: none\n"));
}

#[test]
fn delete_clears_pointer_and_yields_not_found() {
    let mut court = Court::new(MemoryCaseStore::new());
    let first = court.file_case("foo").unwrap().unwrap();
    let last = court.file_case("bar").unwrap().unwrap();
    assert_eq!(court.store().last_case_id(), Some(last.id.clone()));

    assert!(court.delete_case(&last.id).unwrap());
    assert!(court.case(&last.id).is_none());
    assert_eq!(court.store().last_case_id(), None);
    assert!(court.last_case().is_none());
    assert!(!court.delete_case(&last.id).unwrap());
    assert!(court.case(&first.id).is_some());
    assert!(matches!(
        court.enter_verdict(&last.id).unwrap_err(),
        CoreError::CaseNotFound(_)
    ));
}

#[test]
fn docket_filter_matches_id_or_text_case_insensitively() {
    let cases = vec![
        build_case("foo", "CC-A".to_string(), "2026-02-10T00:00:00Z").unwrap(),
        build_case("bar", "CC-B".to_string(), "2026-02-10T00:00:00Z").unwrap(),
    ];
    let hits: Vec<&str> = filter_cases(&cases, "a").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(hits, vec!["CC-A", "CC-B"]);

    let hits: Vec<&str> = filter_cases(&cases, "FO").iter().map(|c| c.id.as_str()).collect();
    assert_eq!(hits, vec!["CC-A"]);
    assert_eq!(filter_cases(&cases, "  ").len(), 2);
    assert!(filter_cases(&cases, "zzz").is_empty());
}

#[test]
fn docket_csv_lists_cases_in_stored_order() {
    let mut court = Court::new(MemoryCaseStore::new());
    let first = court.file_case("foo").unwrap().unwrap();
    let second = court.file_case("bar").unwrap().unwrap();
    court
        .select_charge(&first.id, &first.system_charges[1].id, true)
        .unwrap();
    let first = court.enter_verdict(&first.id).unwrap();

    let csv = render_docket_csv(&court.store().list()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "case_id,verdict_level,verdict_text,selected_count,updated_at"
    );
    assert_eq!(
        lines[1],
        format!("{},,{},0,{}", second.id, UNDECIDED_LABEL, second.updated_at)
    );
    assert_eq!(
        lines[2],
        format!("{},good,{},1,{}", first.id, first.verdict_text, first.updated_at)
    );
    assert!(!csv.contains('\r'));
}

#[test]
fn journal_records_lifecycle_as_an_intact_chain() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCaseStore::open(dir.path()).unwrap();
    let journal = CaseJournal::open_or_create(dir.path().join("journal.ndjson")).unwrap();
    let mut court = Court::with_journal(store, journal);

    let case = court.file_case(SAMPLE).unwrap().unwrap();
    court
        .select_charge(&case.id, &case.system_charges[0].id, true)
        .unwrap();
    // Re-selecting an already selected charge changes nothing worth journaling.
    court
        .select_charge(&case.id, &case.system_charges[0].id, true)
        .unwrap();
    let custom = court.add_custom_charge(&case.id, "自定义").unwrap().unwrap();
    court.remove_custom_charge(&case.id, &custom).unwrap();
    court.enter_verdict(&case.id).unwrap();
    court.save_case(&case.id).unwrap();
    court.export_report(&case.id).unwrap();
    court.delete_case(&case.id).unwrap();

    let types: Vec<String> = read_events(dir.path().join("journal.ndjson"))
        .unwrap()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            "CASE_FILED",
            "CHARGE_SELECTED",
            "CUSTOM_CHARGE_ADDED",
            "CUSTOM_CHARGE_REMOVED",
            "VERDICT_RENDERED",
            "CASE_SAVED",
            "CASE_EXPORTED",
            "CASE_DELETED",
        ]
    );
    let report = verify_chain(dir.path().join("journal.ndjson")).unwrap();
    assert!(report.is_intact());
    assert_eq!(report.events, 8);
}
