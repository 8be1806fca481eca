pub const DEFENSE_POOL: [&str; 5] = [
    "辩方陈述：该概念故意保持松散，以免过早收敛。",
    "辩方陈述：未定义不是缺陷，而是为了容纳多场景。",
    "辩方陈述：‘可执行性’要求属于过度工程化。",
    "辩方陈述：概念的作用是触发讨论，不是给出闭环方案。",
    "辩方陈述：所谓‘边界’是后验产物，前置边界会误杀可能性。",
];

pub const DEFENSE_SUFFIX: &str = "（本段可能在后续被撤回）";

/// Shown beside the stored defense; the defense itself is never deleted.
pub const DEFENSE_RETRACTION_NOTICE: &str = "（撤回权：本辩护可能在下一页被系统否定，但不会被删除。）";

pub fn generate_defense(seed: u32) -> String {
    let pick = DEFENSE_POOL[seed as usize % DEFENSE_POOL.len()];
    format!("{}{}", pick, DEFENSE_SUFFIX)
}
