use court_core::audit::journal::{verify_chain, CaseJournal};
use court_core::config::CourtConfig;
use court_core::court::defense::DEFENSE_RETRACTION_NOTICE;
use court_core::court::docket::{docket_rows, filter_cases, render_docket_csv};
use court_core::court::model::CaseRecord;
use court_core::court::report::report_file_name;
use court_core::court::workflow::{CaseStage, Court};
use court_core::error::{CoreError, CoreResult};
use court_core::storage::file_store::FileCaseStore;
use court_core::storage::store::CaseStore;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: docket <command> [args]
  file <text...>                  file a new case
  show <case_id> [stage]          charges, evidence and/or defense
  select <case_id> <charge> [off] select (or deselect) a charge by id or #n
  add-charge <case_id> <text...>  add a custom charge
  remove-charge <case_id> <id>    remove a custom charge
  verdict <case_id>               enter the verdict stage
  save <case_id>                  re-save the case
  export <case_id> [dir]          render the report to stdout or <dir>/<case_id>.txt
  list [query]                    list cases, optionally filtered
  recent                          most recent cases
  last                            the last touched case
  csv                             docket as CSV
  delete <case_id>                delete a case
  verify-journal                  check the case journal hash chain";

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("court_core=info,docket=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    let cfg = CourtConfig::from_env();
    match run(&cfg, &args) {
        Ok(code) => std::process::exit(code),
        Err(CoreError::CaseNotFound(id)) => {
            // Recovery is navigation, not retry.
            eprintln!("未找到案卷: {} (try `docket list`)", id);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("docket error: {}", e);
            std::process::exit(1);
        }
    }
}

fn open_court(cfg: &CourtConfig) -> CoreResult<Court<FileCaseStore>> {
    tracing::debug!(data_dir = %cfg.data_dir.display(), journal = cfg.journal_enabled, "opening docket");
    let store = FileCaseStore::open(&cfg.data_dir)?;
    if cfg.journal_enabled {
        let journal = CaseJournal::open_or_create(cfg.journal_path())?;
        Ok(Court::with_journal(store, journal))
    } else {
        Ok(Court::new(store))
    }
}

fn arg<'a>(args: &'a [String], i: usize, what: &str) -> CoreResult<&'a str> {
    args.get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| CoreError::InvalidInput(format!("missing {}\n{}", what, USAGE)))
}

fn run(cfg: &CourtConfig, args: &[String]) -> CoreResult<i32> {
    let mut court = open_court(cfg)?;
    match args[0].as_str() {
        "file" => match court.file_case(&args[1..].join(" "))? {
            Some(case) => {
                println!("{}", case.id);
                print_charges(&case);
            }
            None => eprintln!("empty text; nothing filed"),
        },
        "show" => {
            let case = require(&court, arg(args, 1, "case_id")?)?;
            match args.get(2) {
                Some(raw) => print_stage(&case, parse_stage(raw)?)?,
                None => {
                    for stage in [CaseStage::Charges, CaseStage::Evidence, CaseStage::Defense] {
                        print_stage(&case, stage)?;
                    }
                }
            }
        }
        "select" => {
            let case = require(&court, arg(args, 1, "case_id")?)?;
            let charge_id = resolve_charge(&case, arg(args, 2, "charge")?)?;
            let on = args.get(3).map(|s| s.as_str()) != Some("off");
            let updated = court.select_charge(&case.id, &charge_id, on)?;
            println!("selected {}", updated.selected_charge_ids.len());
        }
        "add-charge" => {
            let case_id = arg(args, 1, "case_id")?;
            match court.add_custom_charge(case_id, &args[2..].join(" "))? {
                Some(id) => println!("{}", id),
                None => eprintln!("blank or duplicate charge; nothing added"),
            }
        }
        "remove-charge" => {
            let removed =
                court.remove_custom_charge(arg(args, 1, "case_id")?, arg(args, 2, "charge id")?)?;
            if !removed {
                eprintln!("no such custom charge");
                return Ok(1);
            }
        }
        "verdict" => {
            let case = court.enter_verdict(arg(args, 1, "case_id")?)?;
            print_verdict(&case);
        }
        "save" => {
            let case = court.save_case(arg(args, 1, "case_id")?)?;
            println!("saved {} at {}", case.id, case.updated_at);
        }
        "export" => {
            let case = court.enter_verdict(arg(args, 1, "case_id")?)?;
            let report = court.export_report(&case.id)?;
            match args.get(2) {
                Some(dir) => {
                    let path = std::path::Path::new(dir).join(report_file_name(&case));
                    std::fs::write(&path, report)?;
                    println!("{}", path.display());
                }
                None => print!("{}", report),
            }
        }
        "list" => {
            let cases = court.store().list();
            let query = args.get(1).map(|s| s.as_str()).unwrap_or("");
            let hits: Vec<CaseRecord> = filter_cases(&cases, query).into_iter().cloned().collect();
            print_rows(&hits);
        }
        "recent" => print_rows(&court.recent_cases(cfg.recent_limit)),
        "last" => match court.last_case() {
            Some(case) => println!("{}", case.id),
            None => {
                eprintln!("no last case");
                return Ok(1);
            }
        },
        "csv" => print!("{}", render_docket_csv(&court.store().list())?),
        "delete" => {
            let case_id = arg(args, 1, "case_id")?;
            if !court.delete_case(case_id)? {
                return Err(CoreError::CaseNotFound(case_id.to_string()));
            }
        }
        "verify-journal" => {
            let report = verify_chain(cfg.journal_path())?;
            println!("{}", serde_json::json!({
                "events": report.events,
                "first_broken_line": report.first_broken_line,
            }));
            if !report.is_intact() {
                return Ok(1);
            }
        }
        other => {
            eprintln!("unknown command: {}\n{}", other, USAGE);
            return Ok(2);
        }
    }
    Ok(0)
}

fn require(court: &Court<FileCaseStore>, case_id: &str) -> CoreResult<CaseRecord> {
    court
        .case(case_id)
        .ok_or_else(|| CoreError::CaseNotFound(case_id.to_string()))
}

/// `#n` is the 1-based position in the combined charge list; anything else is an id.
fn resolve_charge(case: &CaseRecord, reference: &str) -> CoreResult<String> {
    let Some(n) = reference.strip_prefix('#') else {
        return Ok(reference.to_string());
    };
    n.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| case.all_charges().nth(i))
        .map(|c| c.id.clone())
        .ok_or_else(|| CoreError::UnknownCharge {
            case_id: case.id.clone(),
            charge_id: reference.to_string(),
        })
}

fn parse_stage(raw: &str) -> CoreResult<CaseStage> {
    match raw {
        "charges" => Ok(CaseStage::Charges),
        "evidence" => Ok(CaseStage::Evidence),
        "defense" => Ok(CaseStage::Defense),
        "verdict" => Ok(CaseStage::Verdict),
        other => Err(CoreError::InvalidInput(format!(
            "unknown stage {} (charges|evidence|defense)",
            other
        ))),
    }
}

fn print_stage(case: &CaseRecord, stage: CaseStage) -> CoreResult<()> {
    match stage {
        CaseStage::Charges => print_charges(case),
        CaseStage::Evidence => {
            let ev = &case.evidence;
            println!("[evidence]");
            println!("  quotes: {}", or_none(&ev.quotes));
            println!("  abstract: {}", or_none(&ev.abstract_hits));
            println!("  pivots: {}", or_none(&ev.pivots));
            for s in &ev.suspects {
                println!("  suspect: {}", s);
            }
            println!("  {}", ev.note);
        }
        CaseStage::Defense => {
            println!("[defense]");
            println!("  {}", case.defense);
            println!("  {}", DEFENSE_RETRACTION_NOTICE);
        }
        // Showing the verdict recomputes it; that belongs to `docket verdict`.
        CaseStage::Intake | CaseStage::Verdict => {
            return Err(CoreError::InvalidInput(format!(
                "{:?} is not a read-only stage; use `docket verdict`",
                stage
            )));
        }
    }
    Ok(())
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(" / ")
    }
}

fn print_charges(case: &CaseRecord) {
    println!("[charges]");
    for (i, c) in case.all_charges().enumerate() {
        let mark = if case.selected_charge_ids.contains(&c.id) { "x" } else { " " };
        println!("  #{} [{}] {} {}", i + 1, mark, c.id, c.text);
    }
}

fn print_verdict(case: &CaseRecord) {
    println!("[verdict:{}] {}", case.verdict_level.as_str(), case.verdict_text);
    for (i, r) in case.remedies.iter().enumerate() {
        println!("  {}. {}", i + 1, r);
    }
}

fn print_rows(cases: &[CaseRecord]) {
    if cases.is_empty() {
        println!("案卷库为空。");
        return;
    }
    for row in docket_rows(cases) {
        println!("{}\t{}\t{}", row.case_id, row.verdict_label, row.updated_at);
    }
}
