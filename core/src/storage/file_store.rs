use crate::court::model::CaseRecord;
use crate::error::CoreResult;
use crate::storage::index::CaseIndex;
use crate::storage::store::{CaseStore, StoreWrite};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CASES_FILE: &str = "cases.json";
pub const LAST_CASE_FILE: &str = "last_case_id";

/// File-backed store with two slots under `root`: the case collection as a
/// JSON array in stored order, and the last-case pointer as plain text.
///
/// No schema versioning. A collection that fails to parse is treated as empty.
/// Every write re-reads both slots first, so records written by other handles
/// survive; two writers touching the same id are last-write-wins.
pub struct FileCaseStore {
    root: PathBuf,
    cases: CaseIndex,
    last_case_id: Option<String>,
}

impl FileCaseStore {
    pub fn open(root: impl AsRef<Path>) -> CoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        let mut store = Self {
            root,
            cases: CaseIndex::default(),
            last_case_id: None,
        };
        store.reload();
        Ok(store)
    }

    /// Re-reads both slots from disk, replacing the in-memory view.
    pub fn reload(&mut self) {
        self.cases = CaseIndex::from_ordered(load_cases(&self.root.join(CASES_FILE)));
        self.last_case_id = load_last_case_id(&self.root.join(LAST_CASE_FILE));
    }

    fn persist(&self) -> StoreWrite {
        match self.write_slots() {
            Ok(()) => StoreWrite::Durable,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "case store write failed; keeping in-memory state");
                StoreWrite::Volatile {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn write_slots(&self) -> CoreResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.cases.to_vec())?;
        write_atomic(&self.root.join(CASES_FILE), &bytes)?;
        let pointer = self.root.join(LAST_CASE_FILE);
        match &self.last_case_id {
            Some(id) => write_atomic(&pointer, id.as_bytes())?,
            None => match fs::remove_file(&pointer) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

impl CaseStore for FileCaseStore {
    fn get(&self, id: &str) -> Option<CaseRecord> {
        self.cases.get(id).cloned()
    }

    fn upsert(&mut self, record: CaseRecord) -> StoreWrite {
        self.reload();
        let id = record.id.clone();
        let inserted = self.cases.upsert(record);
        self.last_case_id = Some(id.clone());
        tracing::debug!(case_id = %id, inserted, "case upserted");
        self.persist()
    }

    fn delete(&mut self, id: &str) -> StoreWrite {
        self.reload();
        if self.cases.remove(id).is_some() {
            tracing::info!(case_id = %id, "case deleted");
        }
        if self.last_case_id.as_deref() == Some(id) {
            self.last_case_id = None;
        }
        self.persist()
    }

    fn list(&self) -> Vec<CaseRecord> {
        self.cases.to_vec()
    }

    fn last_case_id(&self) -> Option<String> {
        self.last_case_id.clone()
    }

    fn refresh(&mut self) {
        self.reload();
    }
}

fn load_cases(path: &Path) -> Vec<CaseRecord> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable case collection; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_slice::<Vec<CaseRecord>>(&bytes) {
        Ok(cases) => cases,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed case collection; starting empty");
            Vec::new()
        }
    }
}

fn load_last_case_id(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let id = raw.trim();
    (!id.is_empty()).then(|| id.to_string())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CoreResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
