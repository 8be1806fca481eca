use crate::court::model::CaseRecord;
use std::collections::{BTreeMap, HashMap};

/// Ordered id -> record mapping. New ids take an order key below the current
/// front; replacing an existing id keeps its key, so its position is stable.
#[derive(Debug, Clone, Default)]
pub struct CaseIndex {
    entries: HashMap<String, (i64, CaseRecord)>,
    order: BTreeMap<i64, String>,
}

impl CaseIndex {
    /// Builds from records in stored order (front first). A repeated id keeps
    /// its first position and its last contents, as sequential upserts would.
    pub fn from_ordered(records: Vec<CaseRecord>) -> Self {
        let mut idx = Self::default();
        for record in records {
            match idx.entries.get_mut(&record.id) {
                Some(slot) => slot.1 = record,
                None => {
                    let key = idx.order.keys().next_back().map(|k| k + 1).unwrap_or(0);
                    idx.order.insert(key, record.id.clone());
                    idx.entries.insert(record.id.clone(), (key, record));
                }
            }
        }
        idx
    }

    /// Returns true when the id was new and went to the front.
    pub fn upsert(&mut self, record: CaseRecord) -> bool {
        if let Some(slot) = self.entries.get_mut(&record.id) {
            slot.1 = record;
            return false;
        }
        let key = self.order.keys().next().map(|k| k - 1).unwrap_or(0);
        self.order.insert(key, record.id.clone());
        self.entries.insert(record.id.clone(), (key, record));
        true
    }

    pub fn get(&self, id: &str) -> Option<&CaseRecord> {
        self.entries.get(id).map(|(_, r)| r)
    }

    pub fn remove(&mut self, id: &str) -> Option<CaseRecord> {
        let (key, record) = self.entries.remove(id)?;
        self.order.remove(&key);
        Some(record)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CaseRecord> {
        self.order
            .values()
            .filter_map(move |id| self.entries.get(id).map(|(_, r)| r))
    }

    pub fn to_vec(&self) -> Vec<CaseRecord> {
        self.iter().cloned().collect()
    }
}
