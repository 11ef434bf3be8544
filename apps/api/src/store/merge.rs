//! Merge-on-load: a stored blob is layered over the hard-coded defaults
//! field-by-field, so fields introduced after the blob was written acquire
//! their default values instead of going missing. No versioned migrations —
//! the merge IS the schema-evolution story.

use serde_json::Value;
use tracing::warn;

use crate::models::presentation::PersistedCv;

/// Recursively merges `stored` over `defaults`. Objects merge per key;
/// stored scalars and arrays win wholesale; stored `null` never erases a
/// default.
pub fn merge_defaults(defaults: Value, stored: Value) -> Value {
    match (defaults, stored) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, stored_value) in overlay {
                let merged = match base.remove(&key) {
                    Some(default_value) => merge_defaults(default_value, stored_value),
                    None => stored_value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (defaults, Value::Null) => defaults,
        (_, stored) => stored,
    }
}

/// Parses a raw stored blob into a `PersistedCv`, merged over defaults.
/// A corrupt or structurally unusable blob falls back to defaults silently —
/// this path must never surface an error to the user.
pub fn load_persisted(raw: &str) -> PersistedCv {
    let stored: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored CV blob is not valid JSON, starting from defaults: {e}");
            return PersistedCv::default();
        }
    };

    let defaults = match serde_json::to_value(PersistedCv::default()) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to serialize defaults for merge: {e}");
            return PersistedCv::default();
        }
    };

    match serde_json::from_value(merge_defaults(defaults, stored)) {
        Ok(state) => state,
        Err(e) => {
            warn!("Stored CV blob has an unusable shape, starting from defaults: {e}");
            PersistedCv::default()
        }
    }
}
