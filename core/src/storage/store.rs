use crate::court::model::CaseRecord;
use crate::storage::index::CaseIndex;

/// Outcome of a persisting store operation. Writes are best-effort: the
/// in-memory state is updated even when the backing write fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Durable,
    Volatile { reason: String },
}

impl StoreWrite {
    pub fn is_durable(&self) -> bool {
        matches!(self, StoreWrite::Durable)
    }
}

/// Case record store: an ordered mapping (most recent first) plus the
/// last-case pointer. Lookups never fail; a missing id is `None`.
pub trait CaseStore {
    fn get(&self, id: &str) -> Option<CaseRecord>;

    /// Replaces in place when the id exists, otherwise inserts at the front.
    /// Always moves the last-case pointer to `record.id`.
    fn upsert(&mut self, record: CaseRecord) -> StoreWrite;

    /// Removes the record and clears the last-case pointer if it named it.
    fn delete(&mut self, id: &str) -> StoreWrite;

    fn list(&self) -> Vec<CaseRecord>;

    fn last_case_id(&self) -> Option<String>;

    /// Picks up writes made outside this handle. No-op for purely in-memory stores.
    fn refresh(&mut self) {}

    fn recent(&self, limit: usize) -> Vec<CaseRecord> {
        let mut cases = self.list();
        cases.truncate(limit);
        cases
    }
}

#[derive(Debug, Default)]
pub struct MemoryCaseStore {
    cases: CaseIndex,
    last_case_id: Option<String>,
}

impl MemoryCaseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaseStore for MemoryCaseStore {
    fn get(&self, id: &str) -> Option<CaseRecord> {
        self.cases.get(id).cloned()
    }

    fn upsert(&mut self, record: CaseRecord) -> StoreWrite {
        self.last_case_id = Some(record.id.clone());
        self.cases.upsert(record);
        StoreWrite::Durable
    }

    fn delete(&mut self, id: &str) -> StoreWrite {
        self.cases.remove(id);
        if self.last_case_id.as_deref() == Some(id) {
            self.last_case_id = None;
        }
        StoreWrite::Durable
    }

    fn list(&self) -> Vec<CaseRecord> {
        self.cases.to_vec()
    }

    fn last_case_id(&self) -> Option<String> {
        self.last_case_id.clone()
    }
}
