//! Ordered field record flowing through every pipeline stage

use super::timestamp::ResolvedTimestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a record field: a header label or a zero-based column position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKey {
    Index(usize),
    Name(String),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Index(index) => write!(f, "{}", index),
            FieldKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey::Name(name)
    }
}

impl From<&String> for FieldKey {
    fn from(name: &String) -> Self {
        FieldKey::Name(name.clone())
    }
}

impl From<usize> for FieldKey {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}

/// Field value: raw text as read, or a resolved timestamp
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Timestamp(ResolvedTimestamp),
}

impl Value {
    /// Borrow the text, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Timestamp(_) => None,
        }
    }

    /// Borrow the timestamp, if this is a resolved timestamp
    pub fn as_timestamp(&self) -> Option<&ResolvedTimestamp> {
        match self {
            Value::Timestamp(timestamp) => Some(timestamp),
            Value::Text(_) => None,
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Timestamp(timestamp) => write!(f, "{}", timestamp),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<ResolvedTimestamp> for Value {
    fn from(timestamp: ResolvedTimestamp) -> Self {
        Value::Timestamp(timestamp)
    }
}

/// Ordered mapping from unique field keys to values
///
/// Field order is significant: it is the column order of the source line and
/// the column order used when the record is written back out. Equality
/// compares keys, values and order. Cloning is a deep copy, so stages can hand
/// out new records without touching their input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(FieldKey, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Build a record with positional keys `0..n` from raw text fields
    pub fn from_positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (FieldKey::Index(index), Value::Text(value.into())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of a key within the record
    pub fn position(&self, key: &FieldKey) -> Option<usize> {
        self.fields.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &FieldKey) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &FieldKey) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Text value of a field; `None` when missing or not text
    pub fn get_text(&self, key: &FieldKey) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Timestamp value of a field; `None` when missing or not a timestamp
    pub fn get_timestamp(&self, key: &FieldKey) -> Option<&ResolvedTimestamp> {
        self.get(key).and_then(Value::as_timestamp)
    }

    /// Set a field, replacing the value in place when the key already exists
    /// and appending otherwise
    pub fn insert(&mut self, key: impl Into<FieldKey>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => self.fields[index].1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Insert a field at a position, removing any existing field with the
    /// same key first. The position is clamped to the record length.
    pub fn insert_at(&mut self, index: usize, key: impl Into<FieldKey>, value: impl Into<Value>) {
        let key = key.into();
        self.remove(&key);
        let index = index.min(self.fields.len());
        self.fields.insert(index, (key, value.into()));
    }

    /// Remove a field, returning its value
    pub fn remove(&mut self, key: &FieldKey) -> Option<Value> {
        self.position(key).map(|index| self.fields.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.fields.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &Value)> {
        self.fields.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(FieldKey, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (FieldKey, Value)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (FieldKey, Value);
    type IntoIter = std::vec::IntoIter<(FieldKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::from_positional(["100", "2016", "159", "0", "11.273"])
    }

    #[test]
    fn test_positional_keys_preserve_order() {
        let record = sample();
        let keys: Vec<_> = record.keys().cloned().collect();
        assert_eq!(keys, (0..5).map(FieldKey::Index).collect::<Vec<_>>());
        assert_eq!(record.get_text(&FieldKey::Index(4)), Some("11.273"));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = sample();
        record.insert(2usize, "160");
        assert_eq!(record.len(), 5);
        assert_eq!(record.position(&FieldKey::Index(2)), Some(2));
        assert_eq!(record.get_text(&2usize.into()), Some("160"));

        record.insert("Station", "Abisko");
        assert_eq!(record.position(&"Station".into()), Some(5));
    }

    #[test]
    fn test_insert_at_keeps_keys_unique() {
        let mut record = sample();
        record.insert_at(0, 4usize, "moved");
        assert_eq!(record.len(), 5);
        assert_eq!(record.position(&FieldKey::Index(4)), Some(0));

        record.insert_at(99, "Tail", "end");
        assert_eq!(record.position(&"Tail".into()), Some(5));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: Record = [
            (FieldKey::from("a"), Value::from("1")),
            (FieldKey::from("b"), Value::from("2")),
        ]
        .into_iter()
        .collect();
        let b: Record = [
            (FieldKey::from("b"), Value::from("2")),
            (FieldKey::from("a"), Value::from("1")),
        ]
        .into_iter()
        .collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_remove_and_missing_lookups() {
        let mut record = sample();
        assert_eq!(record.remove(&FieldKey::Index(0)), Some(Value::from("100")));
        assert!(!record.contains_key(&FieldKey::Index(0)));
        assert!(record.get(&"missing".into()).is_none());
        assert!(record.get_timestamp(&FieldKey::Index(1)).is_none());
    }
}
