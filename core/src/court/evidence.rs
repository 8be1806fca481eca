use crate::court::charges::{compile, ABSTRACT_TERMS_PATTERN};
use crate::court::model::Evidence;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_QUOTES: usize = 3;
pub const MAX_ABSTRACT_HITS: usize = 8;
pub const MAX_PIVOTS: usize = 8;

const QUOTE_PATTERN: &str = r#"“[^”]{1,40}”|"[^"]{1,40}""#;
const PIVOT_PATTERN: &str = "但是|然而|不过|所以|因此|同时";

pub const SUSPECT_ABSTRACT: &str = "抽象词嫌疑：以抽象词代替具体对象。";
pub const SUSPECT_QUOTED: &str = "引述嫌疑：借引号转移表述责任。";
pub const SUSPECT_PIVOT: &str = "转折嫌疑：借转折或因果词切换立场。";
/// Absence of markers is treated as more suspicious, not less.
pub const SUSPECT_NO_MARKERS: &str = "无显性标记：表面干净，反而更难审查。";

pub const EVIDENCE_NOTE: &str = "证据为文本表面提取；不保证指向真实对象，亦不具约束力。";

struct Patterns {
    quotes: Regex,
    abstract_terms: Regex,
    pivots: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        quotes: compile(QUOTE_PATTERN),
        abstract_terms: compile(ABSTRACT_TERMS_PATTERN),
        pivots: compile(PIVOT_PATTERN),
    })
}

fn first_matches(re: &Regex, text: &str, cap: usize) -> Vec<String> {
    re.find_iter(text)
        .take(cap)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Seed-independent; quotes keep their quotation marks as matched.
pub fn extract_evidence(text: &str) -> Evidence {
    let t = text.trim();
    let p = patterns();
    let quotes = first_matches(&p.quotes, t, MAX_QUOTES);
    let abstract_hits = first_matches(&p.abstract_terms, t, MAX_ABSTRACT_HITS);
    let pivots = first_matches(&p.pivots, t, MAX_PIVOTS);
    let suspects = classify_suspects(&quotes, &abstract_hits, &pivots);
    Evidence {
        quotes,
        abstract_hits,
        pivots,
        suspects,
        note: EVIDENCE_NOTE.to_string(),
    }
}

fn classify_suspects(quotes: &[String], abstract_hits: &[String], pivots: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    if !abstract_hits.is_empty() {
        out.push(SUSPECT_ABSTRACT.to_string());
    }
    if !quotes.is_empty() {
        out.push(SUSPECT_QUOTED.to_string());
    }
    if !pivots.is_empty() {
        out.push(SUSPECT_PIVOT.to_string());
    }
    if out.is_empty() {
        out.push(SUSPECT_NO_MARKERS.to_string());
    }
    out
}
