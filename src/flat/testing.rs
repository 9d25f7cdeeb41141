//! Test support
//!
//! Small factories for building expected values and records in tests
//! without the `to_string()` noise.

use crate::flat::values::{Record, Value};

/// A scalar value.
pub fn scalar(raw: &str) -> Value {
    Value::Scalar(raw.to_string())
}

/// A multi-value; `None` segments are null entries.
pub fn multi(parts: &[Option<&str>]) -> Value {
    Value::Multi(parts.iter().map(|part| part.map(str::to_string)).collect())
}

/// A record from `(key, value)` pairs, in order.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}
