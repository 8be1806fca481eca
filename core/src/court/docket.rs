use crate::court::model::{CaseRecord, VerdictLevel};
use crate::error::CoreResult;
use serde::Serialize;

pub const UNDECIDED_LABEL: &str = "未判决";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocketRow {
    pub case_id: String,
    pub verdict_label: String,
    pub verdict_level: Option<VerdictLevel>,
    pub selected_count: usize,
    pub updated_at: String,
}

impl DocketRow {
    pub fn from_case(case: &CaseRecord) -> Self {
        let decided = case.has_verdict();
        Self {
            case_id: case.id.clone(),
            verdict_label: if decided {
                case.verdict_text.clone()
            } else {
                UNDECIDED_LABEL.to_string()
            },
            verdict_level: decided.then_some(case.verdict_level),
            selected_count: case.selected_charge_ids.len(),
            updated_at: case.updated_at.clone(),
        }
    }
}

/// Case-insensitive substring match over id or text. A blank query keeps everything.
pub fn filter_cases<'a>(cases: &'a [CaseRecord], query: &str) -> Vec<&'a CaseRecord> {
    let q = query.trim().to_lowercase();
    cases
        .iter()
        .filter(|c| {
            q.is_empty() || c.id.to_lowercase().contains(&q) || c.text.to_lowercase().contains(&q)
        })
        .collect()
}

pub fn docket_rows(cases: &[CaseRecord]) -> Vec<DocketRow> {
    cases.iter().map(DocketRow::from_case).collect()
}

/// Stored order is kept (most recent first).
pub fn render_docket_csv(cases: &[CaseRecord]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "case_id",
        "verdict_level",
        "verdict_text",
        "selected_count",
        "updated_at",
    ])?;
    for row in docket_rows(cases) {
        let level = row.verdict_level.map(|l| l.as_str()).unwrap_or("");
        wtr.write_record([
            row.case_id.as_str(),
            level,
            row.verdict_label.as_str(),
            row.selected_count.to_string().as_str(),
            row.updated_at.as_str(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
