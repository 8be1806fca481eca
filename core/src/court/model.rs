use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    System,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Charge {
    pub id: String,
    pub text: String,
    pub kind: ChargeKind,
}

/// Surface-level lexical snapshot of the filed text. Frozen at intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    pub quotes: Vec<String>,
    pub abstract_hits: Vec<String>,
    pub pivots: Vec<String>,
    pub suspects: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLevel {
    #[default]
    Good,
    Warn,
    Bad,
}

impl VerdictLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLevel::Good => "good",
            VerdictLevel::Warn => "warn",
            VerdictLevel::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub text: String,
    pub level: VerdictLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseRecord {
    pub id: String,
    pub text: String,
    pub seed: u32,
    pub system_charges: Vec<Charge>,
    pub custom_charges: Vec<Charge>,
    pub selected_charge_ids: BTreeSet<String>,
    pub evidence: Evidence,
    pub defense: String,
    pub verdict_text: String,
    pub verdict_level: VerdictLevel,
    pub remedies: Vec<String>,
    pub created_at: String, // RFC3339 UTC
    pub updated_at: String, // RFC3339 UTC
}

impl CaseRecord {
    /// System charges first, then custom charges, each in stored order.
    pub fn all_charges(&self) -> impl Iterator<Item = &Charge> {
        self.system_charges.iter().chain(self.custom_charges.iter())
    }

    pub fn find_charge(&self, charge_id: &str) -> Option<&Charge> {
        self.all_charges().find(|c| c.id == charge_id)
    }

    /// Selected charges in display order; ids that no longer resolve are skipped.
    pub fn selected_charges(&self) -> Vec<&Charge> {
        self.all_charges()
            .filter(|c| self.selected_charge_ids.contains(&c.id))
            .collect()
    }

    pub fn has_verdict(&self) -> bool {
        !self.verdict_text.is_empty()
    }

    /// Drops selected ids that no longer name a charge on this record.
    pub fn prune_selection(&mut self) {
        let known: BTreeSet<String> = self.all_charges().map(|c| c.id.clone()).collect();
        self.selected_charge_ids.retain(|id| known.contains(id));
    }
}
