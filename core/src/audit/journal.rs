use crate::audit::event::{compute_event_hash, finalize_event, CaseEvent, ZERO_HASH_64};
use crate::error::{CoreError, CoreResult};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only NDJSON journal of case events, hash-chained line to line.
pub struct CaseJournal {
    path: PathBuf,
    last_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub events: usize,
    /// 1-based position of the first event whose hash or back-link is wrong.
    pub first_broken_line: Option<usize>,
}

impl ChainReport {
    pub fn is_intact(&self) -> bool {
        self.first_broken_line.is_none()
    }
}

impl CaseJournal {
    pub fn open_or_create(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            return Ok(Self {
                path,
                last_hash: ZERO_HASH_64.to_string(),
            });
        }

        let mut last_hash = ZERO_HASH_64.to_string();
        for event in read_events(&path)? {
            last_hash = event.event_hash;
        }
        Ok(Self { path, last_hash })
    }

    pub fn last_hash(&self) -> &str {
        &self.last_hash
    }

    pub fn append(&mut self, mut event: CaseEvent) -> CoreResult<CaseEvent> {
        event.prev_event_hash = self.last_hash.clone();
        let event = finalize_event(event)?;
        let line = serde_json::to_string(&event)?;
        let mut f = OpenOptions::new().append(true).open(&self.path)?;
        f.write_all(line.as_bytes())?;
        f.write_all(b"\n")?;
        self.last_hash = event.event_hash.clone();
        Ok(event)
    }
}

pub fn read_events(path: impl AsRef<Path>) -> CoreResult<Vec<CaseEvent>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut out = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: CaseEvent = serde_json::from_str(&line).map_err(|e| {
            CoreError::InvalidInput(format!("journal line {} is not an event: {}", n + 1, e))
        })?;
        out.push(event);
    }
    Ok(out)
}

/// Recomputes every hash and back-link from the zero hash forward.
pub fn verify_chain(path: impl AsRef<Path>) -> CoreResult<ChainReport> {
    let events = read_events(path)?;
    let mut prev = ZERO_HASH_64.to_string();
    for (i, event) in events.iter().enumerate() {
        if event.prev_event_hash != prev || compute_event_hash(event)? != event.event_hash {
            return Ok(ChainReport {
                events: events.len(),
                first_broken_line: Some(i + 1),
            });
        }
        prev = event.event_hash.clone();
    }
    Ok(ChainReport {
        events: events.len(),
        first_broken_line: None,
    })
}
