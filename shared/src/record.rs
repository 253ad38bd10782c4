//! Untyped row as returned by either read path
//!
//! Keys are folded on insert (lower-case, quotes, whitespace and any byte
//! order mark removed) so `"Tag ID"`, `tagId` and `tagid` all land on the
//! same slot.

use std::collections::HashMap;

use serde_json::Value;

/// Fold a header or JSON key into lookup form
pub fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace() && !matches!(*c, '"' | '\'' | '\u{feff}'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A loosely typed record with folded keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under the folded form of `key`.
    ///
    /// A later key folding to the same slot does not overwrite a non-empty
    /// earlier value.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let slot = self.fields.entry(fold_key(key)).or_default();
        if slot.trim().is_empty() {
            *slot = value;
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value for an already-folded key
    pub fn get(&self, folded_key: &str) -> Option<&str> {
        self.fields.get(folded_key).map(String::as_str)
    }

    /// First non-blank value among `keys`, trimmed
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build from one element of a JSON array.
    ///
    /// Non-objects give an empty record. Scalars are stringified; nulls,
    /// arrays and nested objects are dropped.
    pub fn from_json(value: &Value) -> Self {
        let mut record = Self::new();
        if let Value::Object(map) = value {
            for (key, v) in map {
                let text = match v {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => continue,
                };
                record.insert(key, text);
            }
        }
        record
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k.as_ref(), v);
        }
        record
    }
}
