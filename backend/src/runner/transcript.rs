//! Transcript hashing
//!
//! Used to verify that two runs with the same seed produced the same match.

use crate::negotiator::NegotiationError;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute deterministic SHA256 hash of any serializable value
///
/// Uses canonical JSON serialization with sorted keys so that map iteration
/// order never changes the digest.
pub fn transcript_hash<T: Serialize>(value: &T) -> Result<String, NegotiationError> {
    let value = serde_json::to_value(value).map_err(|e| {
        NegotiationError::Serialization(format!("Transcript serialization failed: {}", e))
    })?;

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        NegotiationError::Serialization(format!("Transcript serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
