use crate::court::model::CaseRecord;

pub const REPORT_CLOSING_NOTE: &str = "Retractions are preserved. Some references may be missing.";

fn joined_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(" / ")
    }
}

/// Plain-text export of a case. Downstream tooling parses this layout, so
/// section headers and ordering are fixed.
pub fn render_case_report(case: &CaseRecord) -> String {
    let selected: Vec<String> = case
        .selected_charges()
        .iter()
        .map(|c| format!("- {}", c.text))
        .collect();
    let remedies: Vec<String> = case
        .remedies
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect();

    let mut out = Vec::new();
    out.push(format!("CASE {}", case.id));
    out.push("TEXT:".to_string());
    out.push(case.text.clone());
    out.push("".to_string());
    out.push("CHARGES (selected):".to_string());
    if selected.is_empty() {
        out.push("(none)".to_string());
    } else {
        out.extend(selected);
    }
    out.push("".to_string());
    out.push("EVIDENCE (surface):".to_string());
    out.push(format!("- quotes: {}", joined_or(&case.evidence.quotes, "none")));
    out.push(format!("- abstract: {}", joined_or(&case.evidence.abstract_hits, "none")));
    out.push(format!("- pivots: {}", joined_or(&case.evidence.pivots, "none")));
    out.push("".to_string());
    out.push("DEFENSE:".to_string());
    out.push(case.defense.clone());
    out.push("".to_string());
    out.push("VERDICT:".to_string());
    out.push(case.verdict_text.clone());
    out.push("".to_string());
    out.push("REMEDIES:".to_string());
    out.push(remedies.join("\n"));
    out.push("".to_string());
    out.push("NOTE:".to_string());
    out.push(REPORT_CLOSING_NOTE.to_string());
    out.push("".to_string());
    out.join("\n")
}

pub fn report_file_name(case: &CaseRecord) -> String {
    format!("{}.txt", case.id)
}
