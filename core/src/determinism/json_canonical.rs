use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use serde_json::Value;

// Canonical bytes for journal hashing:
// - keys sorted lexicographically
// - no insignificant whitespace
// - integers only
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let v = canonicalize(serde_json::to_value(value)?)?;
    Ok(serde_json::to_vec(&v)?)
}

fn canonicalize(v: Value) -> CoreResult<Value> {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::new();
            for (k, vv) in entries {
                out.insert(k, canonicalize(vv)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(arr) => Ok(Value::Array(
            arr.into_iter()
                .map(canonicalize)
                .collect::<CoreResult<Vec<_>>>()?,
        )),
        Value::Number(n) if !(n.is_i64() || n.is_u64()) => Err(CoreError::DeterminismViolation(
            "canonical JSON forbids non-integer numbers".to_string(),
        )),
        other => Ok(other),
    }
}
