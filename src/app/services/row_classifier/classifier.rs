//! Mixed-array row classification by array id

use super::buckets::ArrayBuckets;
use crate::app::models::{FieldKey, Record, Value};
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Optional mapping from raw array id to a readable bucket name
pub type ArrayIdNames = HashMap<String, String>;

/// Literal text of the discriminator column of one record
fn array_id<'a>(record: &'a Record, column: &FieldKey, index: usize) -> Result<Cow<'a, str>> {
    match record.get(column) {
        Some(Value::Text(text)) => Ok(Cow::Borrowed(text.as_str())),
        // Only possible when the discriminator was resolved as a time
        Some(value @ Value::Timestamp(_)) => Ok(Cow::Owned(value.to_string())),
        None => Err(Error::invalid_column(column, index)),
    }
}

/// Partition mixed-array records by the value of `column`
///
/// Ids present in `names` are bucketed under their readable name; every other
/// id is bucketed under its raw value, so no record is ever dropped. Only a
/// record without the discriminator column is an error.
pub fn classify_arrays(
    records: &[Record],
    column: &FieldKey,
    names: Option<&ArrayIdNames>,
) -> Result<ArrayBuckets> {
    let mut buckets = ArrayBuckets::new();

    for (index, record) in records.iter().enumerate() {
        let id = array_id(record, column, index)?;
        // Unmapped ids keep their raw value
        let name = names
            .and_then(|names| names.get(id.as_ref()))
            .map(String::as_str)
            .unwrap_or(id.as_ref());
        buckets.push(name, record.clone());
    }

    Ok(buckets)
}

/// Keep only records whose discriminator is one of `array_ids`
pub fn filter_array_ids<S: AsRef<str>>(
    records: &[Record],
    column: &FieldKey,
    array_ids: &[S],
) -> Result<Vec<Record>> {
    let wanted: HashSet<&str> = array_ids.iter().map(|id| id.as_ref()).collect();

    let mut kept = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if wanted.contains(array_id(record, column, index)?.as_ref()) {
            kept.push(record.clone());
        }
    }
    Ok(kept)
}
