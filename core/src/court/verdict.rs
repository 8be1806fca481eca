use crate::court::model::{Verdict, VerdictLevel};

pub const REJECT_THRESHOLD: usize = 6;
pub const CONDITIONAL_THRESHOLD: usize = 3;

pub const VERDICT_BAD_TEXT: &str = "驳回（概念不成立 / 未达到受理条件）";
pub const VERDICT_WARN_TEXT: &str = "附条件通过（需修正后复审）";
pub const VERDICT_GOOD_TEXT: &str = "通过（但保留撤回权）";

/// Tier by count of selected charges, system and custom combined.
pub fn compute_verdict(selected_count: usize) -> Verdict {
    let (level, text) = if selected_count >= REJECT_THRESHOLD {
        (VerdictLevel::Bad, VERDICT_BAD_TEXT)
    } else if selected_count >= CONDITIONAL_THRESHOLD {
        (VerdictLevel::Warn, VERDICT_WARN_TEXT)
    } else {
        (VerdictLevel::Good, VERDICT_GOOD_TEXT)
    };
    Verdict {
        text: text.to_string(),
        level,
    }
}
