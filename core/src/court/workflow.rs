use crate::audit::event::{
    Actor, CaseEvent, CASE_DELETED, CASE_EXPORTED, CASE_FILED, CASE_SAVED, CHARGE_DESELECTED,
    CHARGE_SELECTED, CUSTOM_CHARGE_ADDED, CUSTOM_CHARGE_REMOVED, STORE_WRITE_DEGRADED,
    VERDICT_RENDERED,
};
use crate::audit::journal::CaseJournal;
use crate::court::charges::{self, generate_charges};
use crate::court::defense::generate_defense;
use crate::court::evidence::extract_evidence;
use crate::court::model::{CaseRecord, VerdictLevel};
use crate::court::remedies::generate_remedies;
use crate::court::report::render_case_report;
use crate::court::verdict::compute_verdict;
use crate::determinism::clock::{now_rfc3339_utc, unix_millis};
use crate::determinism::seed::{derive_case_id_at, derive_seed};
use crate::error::{CoreError, CoreResult};
use crate::storage::store::{CaseStore, StoreWrite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CaseStage {
    Intake,
    Charges,
    Evidence,
    Defense,
    Verdict,
}

impl CaseStage {
    pub fn next(self) -> Option<Self> {
        match self {
            CaseStage::Intake => Some(CaseStage::Charges),
            CaseStage::Charges => Some(CaseStage::Evidence),
            CaseStage::Evidence => Some(CaseStage::Defense),
            CaseStage::Defense => Some(CaseStage::Verdict),
            CaseStage::Verdict => None,
        }
    }
}

/// Forward single steps only; the verdict stage may be re-entered.
pub fn valid_transition(from: CaseStage, to: CaseStage) -> bool {
    from.next() == Some(to) || (from == CaseStage::Verdict && to == CaseStage::Verdict)
}

pub fn check_transition(from: CaseStage, to: CaseStage) -> CoreResult<()> {
    if !valid_transition(from, to) {
        return Err(CoreError::WorkflowTransition(format!(
            "invalid transition {:?} -> {:?}",
            from, to
        )));
    }
    Ok(())
}

/// Intake: builds a fresh record, or `None` for blank text.
pub fn build_case(text: &str, case_id: String, ts_utc: &str) -> Option<CaseRecord> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let seed = derive_seed(text);
    Some(CaseRecord {
        id: case_id,
        text: text.to_string(),
        seed,
        system_charges: generate_charges(text, seed),
        custom_charges: Vec::new(),
        selected_charge_ids: BTreeSet::new(),
        evidence: extract_evidence(text),
        defense: generate_defense(seed),
        verdict_text: String::new(),
        verdict_level: VerdictLevel::default(),
        remedies: Vec::new(),
        created_at: ts_utc.to_string(),
        updated_at: ts_utc.to_string(),
    })
}

/// Recompute-and-set for the verdict stage. Only the verdict fields, remedies
/// and `updated_at` change.
pub fn apply_verdict(case: &mut CaseRecord, ts_utc: &str) {
    let verdict = compute_verdict(case.selected_charge_ids.len());
    case.verdict_text = verdict.text;
    case.verdict_level = verdict.level;
    case.remedies = generate_remedies();
    case.updated_at = ts_utc.to_string();
}

/// Case lifecycle over an injected store. Every mutation refreshes the store and
/// re-fetches the record first; there is no version check, so concurrent
/// writers to the same case are last-write-wins.
pub struct Court<S: CaseStore> {
    store: S,
    journal: Option<CaseJournal>,
}

impl<S: CaseStore> Court<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            journal: None,
        }
    }

    pub fn with_journal(store: S, journal: CaseJournal) -> Self {
        Self {
            store,
            journal: Some(journal),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn case(&self, case_id: &str) -> Option<CaseRecord> {
        self.store.get(case_id)
    }

    pub fn last_case(&self) -> Option<CaseRecord> {
        self.store
            .last_case_id()
            .and_then(|id| self.store.get(&id))
    }

    pub fn recent_cases(&self, limit: usize) -> Vec<CaseRecord> {
        self.store.recent(limit)
    }

    /// Blank text is a no-op and returns `Ok(None)`.
    pub fn file_case(&mut self, text: &str) -> CoreResult<Option<CaseRecord>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("blank submission ignored");
            return Ok(None);
        }
        let ts = now_rfc3339_utc()?;
        self.store.refresh();
        let case_id = self.unused_case_id(derive_seed(trimmed));
        let Some(case) = build_case(trimmed, case_id, &ts) else {
            return Ok(None);
        };
        tracing::info!(case_id = %case.id, seed = case.seed, charges = case.system_charges.len(), "case filed");
        self.persist(case.clone())?;
        self.record(
            CASE_FILED,
            &case.id,
            Actor::User,
            json!({
                "seed": case.seed,
                "system_charge_ids": case.system_charges.iter().map(|c| c.id.clone()).collect::<Vec<_>>(),
            }),
        )?;
        Ok(Some(case))
    }

    pub fn select_charge(
        &mut self,
        case_id: &str,
        charge_id: &str,
        selected: bool,
    ) -> CoreResult<CaseRecord> {
        let mut case = self.require(case_id)?;
        if case.find_charge(charge_id).is_none() {
            return Err(CoreError::UnknownCharge {
                case_id: case_id.to_string(),
                charge_id: charge_id.to_string(),
            });
        }
        let changed = if selected {
            case.selected_charge_ids.insert(charge_id.to_string())
        } else {
            case.selected_charge_ids.remove(charge_id)
        };
        case.updated_at = now_rfc3339_utc()?;
        self.persist(case.clone())?;
        if changed {
            let event_type = if selected {
                CHARGE_SELECTED
            } else {
                CHARGE_DESELECTED
            };
            self.record(
                event_type,
                case_id,
                Actor::User,
                json!({ "charge_id": charge_id, "selected_count": case.selected_charge_ids.len() }),
            )?;
        }
        Ok(case)
    }

    /// Returns the new charge id, or `None` for blank or duplicate text.
    pub fn add_custom_charge(&mut self, case_id: &str, text: &str) -> CoreResult<Option<String>> {
        let mut case = self.require(case_id)?;
        let Some(charge_id) = charges::add_custom_charge(&mut case, text) else {
            return Ok(None);
        };
        case.updated_at = now_rfc3339_utc()?;
        self.persist(case)?;
        self.record(
            CUSTOM_CHARGE_ADDED,
            case_id,
            Actor::User,
            json!({ "charge_id": charge_id }),
        )?;
        Ok(Some(charge_id))
    }

    pub fn remove_custom_charge(&mut self, case_id: &str, charge_id: &str) -> CoreResult<bool> {
        let mut case = self.require(case_id)?;
        if !charges::remove_custom_charge(&mut case, charge_id) {
            return Ok(false);
        }
        case.updated_at = now_rfc3339_utc()?;
        self.persist(case)?;
        self.record(
            CUSTOM_CHARGE_REMOVED,
            case_id,
            Actor::User,
            json!({ "charge_id": charge_id }),
        )?;
        Ok(true)
    }

    /// Verdict stage entry: recompute from the current selection and persist.
    pub fn enter_verdict(&mut self, case_id: &str) -> CoreResult<CaseRecord> {
        let mut case = self.require(case_id)?;
        apply_verdict(&mut case, &now_rfc3339_utc()?);
        tracing::info!(case_id, level = case.verdict_level.as_str(), selected = case.selected_charge_ids.len(), "verdict rendered");
        self.persist(case.clone())?;
        self.record(
            VERDICT_RENDERED,
            case_id,
            Actor::System,
            json!({
                "selected_count": case.selected_charge_ids.len(),
                "verdict_level": case.verdict_level.as_str(),
            }),
        )?;
        Ok(case)
    }

    pub fn save_case(&mut self, case_id: &str) -> CoreResult<CaseRecord> {
        let mut case = self.require(case_id)?;
        case.updated_at = now_rfc3339_utc()?;
        let write = self.persist(case.clone())?;
        self.record(
            CASE_SAVED,
            case_id,
            Actor::User,
            json!({ "durable": write.is_durable() }),
        )?;
        Ok(case)
    }

    pub fn export_report(&mut self, case_id: &str) -> CoreResult<String> {
        let case = self.require(case_id)?;
        let report = render_case_report(&case);
        self.record(
            CASE_EXPORTED,
            case_id,
            Actor::User,
            json!({ "report_bytes": report.len() }),
        )?;
        Ok(report)
    }

    /// Returns whether a record existed. Deleting an unknown id is not an error.
    pub fn delete_case(&mut self, case_id: &str) -> CoreResult<bool> {
        self.store.refresh();
        let existed = self.store.get(case_id).is_some();
        let write = self.store.delete(case_id);
        self.note_degraded(case_id, &write)?;
        if existed {
            self.record(CASE_DELETED, case_id, Actor::User, json!({}))?;
        }
        Ok(existed)
    }

    /// Same text filed twice within one millisecond would reuse an id; step the
    /// clock component forward until the id is free.
    fn unused_case_id(&self, seed: u32) -> String {
        let mut millis = unix_millis();
        let mut case_id = derive_case_id_at(seed, millis);
        while self.store.get(&case_id).is_some() {
            millis += 1;
            case_id = derive_case_id_at(seed, millis);
        }
        case_id
    }

    fn require(&mut self, case_id: &str) -> CoreResult<CaseRecord> {
        self.store.refresh();
        self.store
            .get(case_id)
            .ok_or_else(|| CoreError::CaseNotFound(case_id.to_string()))
    }

    fn persist(&mut self, case: CaseRecord) -> CoreResult<StoreWrite> {
        let case_id = case.id.clone();
        let write = self.store.upsert(case);
        self.note_degraded(&case_id, &write)?;
        Ok(write)
    }

    fn note_degraded(&mut self, case_id: &str, write: &StoreWrite) -> CoreResult<()> {
        if let StoreWrite::Volatile { reason } = write {
            self.record(
                STORE_WRITE_DEGRADED,
                case_id,
                Actor::System,
                json!({ "reason": reason }),
            )?;
        }
        Ok(())
    }

    fn record(
        &mut self,
        event_type: &str,
        case_id: &str,
        actor: Actor,
        details: serde_json::Value,
    ) -> CoreResult<()> {
        let Some(journal) = self.journal.as_mut() else {
            return Ok(());
        };
        journal.append(CaseEvent::new(
            now_rfc3339_utc()?,
            event_type,
            case_id,
            actor,
            details,
        ))?;
        Ok(())
    }
}
