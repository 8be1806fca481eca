use crate::determinism::json_canonical;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseEvent {
    pub ts_utc: String, // RFC3339 UTC
    pub event_type: String,
    pub case_id: String,
    pub actor: Actor,
    pub details: serde_json::Value,
    pub prev_event_hash: String, // hex 64
    pub event_hash: String,      // hex 64
}

impl CaseEvent {
    pub fn new(
        ts_utc: impl Into<String>,
        event_type: &str,
        case_id: &str,
        actor: Actor,
        details: serde_json::Value,
    ) -> Self {
        Self {
            ts_utc: ts_utc.into(),
            event_type: event_type.to_string(),
            case_id: case_id.to_string(),
            actor,
            details,
            prev_event_hash: String::new(),
            event_hash: String::new(),
        }
    }
}

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub const CASE_FILED: &str = "CASE_FILED";
pub const CHARGE_SELECTED: &str = "CHARGE_SELECTED";
pub const CHARGE_DESELECTED: &str = "CHARGE_DESELECTED";
pub const CUSTOM_CHARGE_ADDED: &str = "CUSTOM_CHARGE_ADDED";
pub const CUSTOM_CHARGE_REMOVED: &str = "CUSTOM_CHARGE_REMOVED";
pub const VERDICT_RENDERED: &str = "VERDICT_RENDERED";
pub const CASE_SAVED: &str = "CASE_SAVED";
pub const CASE_EXPORTED: &str = "CASE_EXPORTED";
pub const CASE_DELETED: &str = "CASE_DELETED";
pub const STORE_WRITE_DEGRADED: &str = "STORE_WRITE_DEGRADED";

const EVENT_TYPES: [&str; 10] = [
    CASE_FILED,
    CHARGE_SELECTED,
    CHARGE_DESELECTED,
    CUSTOM_CHARGE_ADDED,
    CUSTOM_CHARGE_REMOVED,
    VERDICT_RENDERED,
    CASE_SAVED,
    CASE_EXPORTED,
    CASE_DELETED,
    STORE_WRITE_DEGRADED,
];

// event_hash = SHA-256 of the canonical envelope with event_hash forced to zeros.
pub fn compute_event_hash(event: &CaseEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.event_hash = ZERO_HASH_64.to_string();
    let bytes = json_canonical::to_canonical_bytes(&e)?;
    let mut h = Sha256::new();
    h.update(bytes);
    Ok(hex::encode(h.finalize()))
}

pub fn finalize_event(mut event: CaseEvent) -> CoreResult<CaseEvent> {
    if !is_hex64(&event.prev_event_hash) {
        return Err(CoreError::InvalidInput(
            "prev_event_hash must be 64 hex chars".to_string(),
        ));
    }
    if !EVENT_TYPES.contains(&event.event_type.as_str()) {
        return Err(CoreError::InvalidInput(format!(
            "unknown journal event type: {}",
            event.event_type
        )));
    }
    event.event_hash = compute_event_hash(&event)?;
    Ok(event)
}

fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}
