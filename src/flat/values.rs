//! Record value types
//!
//! A mapped row is an ordered sequence of `(column name, value)` pairs. A
//! value is either absent, a single scalar string, or a multi-value produced
//! by the list-delimiter split. Empty strings are normalized to absent
//! values everywhere, never stored as `""`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Normalize an empty string to an absent value.
pub fn normalize_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// The value of one record field.
///
/// Serializes untagged: `Null` as JSON null, `Scalar` as a string, `Multi`
/// as an array whose empty segments appear as nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Scalar(String),
    Multi(Vec<Option<String>>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The scalar content, if this is a single non-empty value.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(raw) => Some(raw),
            _ => None,
        }
    }

    /// The split segments, if this is a multi-value.
    pub fn as_multi(&self) -> Option<&[Option<String>]> {
        match self {
            Value::Multi(parts) => Some(parts),
            _ => None,
        }
    }
}

/// An ordered key-value record built from one data row.
///
/// Keys appear in column-name order and are unique (column names are
/// validated before any record is built). Serialization preserves the
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Record {
            entries: Vec::new(),
        }
    }

    /// Append a pair. Callers are responsible for key uniqueness.
    pub fn insert(&mut self, key: String, value: Value) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
