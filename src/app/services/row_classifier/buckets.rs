//! Insertion-ordered array-type buckets

use crate::app::models::Record;
use std::collections::HashMap;

/// Records grouped by array type, in first-seen order
///
/// Each bucket keeps its records in input order. Lookup by name is O(1);
/// iteration follows the order in which buckets were created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayBuckets {
    buckets: Vec<(String, Vec<Record>)>,
    index: HashMap<String, usize>,
}

impl ArrayBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the named bucket, creating the bucket on first use
    pub fn push(&mut self, name: &str, record: Record) {
        match self.index.get(name) {
            Some(&position) => self.buckets[position].1.push(record),
            // First record of a new array type
            None => {
                self.index.insert(name.to_string(), self.buckets.len());
                self.buckets.push((name.to_string(), vec![record]));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Record]> {
        self.index
            .get(name)
            .map(|&position| self.buckets[position].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Bucket names in creation order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.buckets
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of records across all buckets
    pub fn total_records(&self) -> usize {
        self.buckets.iter().map(|(_, records)| records.len()).sum()
    }
}

impl IntoIterator for ArrayBuckets {
    type Item = (String, Vec<Record>);
    type IntoIter = std::vec::IntoIter<(String, Vec<Record>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}
