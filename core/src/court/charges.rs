use crate::court::model::{CaseRecord, Charge, ChargeKind};
use crate::determinism::seed::{charge_id, custom_charge_id};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_CHARGES: usize = 8;
pub const RETRACTION_INDEX: usize = 3;

pub const BASE_CHARGES: [&str; 6] = [
    "定义缺失：关键术语未被界定。",
    "边界不明：概念适用范围无法圈定。",
    "可证伪性不足：无法指出何时算不成立。",
    "偷换风险：同一词在不同句段可能指不同对象。",
    "指向过多：一句话承担了多种任务（描述/评价/命令混在一起）。",
    "可执行性不足：即使同意，也无法据此采取动作。",
];

pub const SELF_REFERENCE_CHARGE: &str = "自指循环：概念用自身解释自身。";
pub const ABSTRACT_STACKING_CHARGE: &str = "抽象堆叠：抽象词连续出现，掩盖了对象。";
pub const HEDGING_CHARGE: &str = "不确定性过载：语气回避导致判断无法落地。";
pub const RETRACTION_CHARGE: &str = "撤回条款：以上指控可能成立；也可能只是措辞误伤。（保留）";

const SELF_REFERENCE_PATTERN: &str = "这句话|本句|本概念|这个概念|本身";
pub(crate) const ABSTRACT_TERMS_PATTERN: &str = "本质|意义|价值|系统|概念|真实|清晰|升级|边界";
const HEDGING_PATTERN: &str = "可能|大概|也许|似乎|差不多";

struct Triggers {
    self_reference: Regex,
    abstract_terms: Regex,
    hedging: Regex,
}

fn triggers() -> &'static Triggers {
    static TRIGGERS: OnceLock<Triggers> = OnceLock::new();
    TRIGGERS.get_or_init(|| Triggers {
        self_reference: compile(SELF_REFERENCE_PATTERN),
        abstract_terms: compile(ABSTRACT_TERMS_PATTERN),
        hedging: compile(HEDGING_PATTERN),
    })
}

// Patterns are literal alternations; compilation cannot fail.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

/// Base pool ordered by `(seed % 97 + i * 17) % 101`, stable on ties.
pub fn seeded_base_order(seed: u32) -> Vec<&'static str> {
    let s = seed % 97;
    let mut keyed: Vec<(u32, &'static str)> = BASE_CHARGES
        .iter()
        .enumerate()
        .map(|(i, text)| ((s + i as u32 * 17) % 101, *text))
        .collect();
    keyed.sort_by_key(|(k, _)| *k);
    keyed.into_iter().map(|(_, text)| text).collect()
}

/// Phase one: lexical trigger charges in priority order, then the seeded base pool.
pub fn candidate_charges(text: &str, seed: u32) -> Vec<&'static str> {
    let t = text.trim();
    let tr = triggers();
    let mut out = Vec::with_capacity(BASE_CHARGES.len() + 3);
    if tr.self_reference.is_match(t) {
        out.push(SELF_REFERENCE_CHARGE);
    }
    if tr.abstract_terms.is_match(t) {
        out.push(ABSTRACT_STACKING_CHARGE);
    }
    if tr.hedging.is_match(t) {
        out.push(HEDGING_CHARGE);
    }
    out.extend(seeded_base_order(seed));
    out
}

/// Phase two: the retraction clause goes in at index 3 (or the end of a shorter
/// sequence), then the list is capped.
pub fn apply_structure(mut candidates: Vec<&'static str>) -> Vec<&'static str> {
    let at = RETRACTION_INDEX.min(candidates.len());
    candidates.insert(at, RETRACTION_CHARGE);
    candidates.truncate(MAX_CHARGES);
    candidates
}

pub fn generate_charges(text: &str, seed: u32) -> Vec<Charge> {
    let charges: Vec<Charge> = apply_structure(candidate_charges(text, seed))
        .into_iter()
        .map(|t| Charge {
            id: charge_id(seed, t),
            text: t.to_string(),
            kind: ChargeKind::System,
        })
        .collect();
    tracing::debug!(seed, count = charges.len(), "generated system charges");
    charges
}

/// Appends a user charge. Returns the new charge id, or `None` when the text is
/// blank or an identical custom charge already exists.
pub fn add_custom_charge(case: &mut CaseRecord, text: &str) -> Option<String> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    let id = custom_charge_id(case.seed, t);
    if case.custom_charges.iter().any(|c| c.id == id) {
        return None;
    }
    case.custom_charges.push(Charge {
        id: id.clone(),
        text: t.to_string(),
        kind: ChargeKind::Custom,
    });
    Some(id)
}

/// Removes a custom charge and prunes it from the selection.
/// System charges are never removed.
pub fn remove_custom_charge(case: &mut CaseRecord, charge_id: &str) -> bool {
    let before = case.custom_charges.len();
    case.custom_charges.retain(|c| c.id != charge_id);
    let removed = case.custom_charges.len() != before;
    if removed {
        case.prune_selection();
    }
    removed
}
