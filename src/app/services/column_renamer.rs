//! Positional column renaming

use crate::app::models::{FieldKey, Record};
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Replace the keys of every record, position by position
///
/// Values and their order are untouched. Each record must have exactly as
/// many fields as there are names.
pub fn rename_columns(records: &[Record], names: &[FieldKey]) -> Result<Vec<Record>> {
    let unique: HashSet<&FieldKey> = names.iter().collect();
    if unique.len() != names.len() {
        return Err(Error::configuration(
            "Column names must be unique within a record",
        ));
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if record.len() != names.len() {
                return Err(Error::column_count_mismatch(
                    index,
                    record.len(),
                    names.len(),
                ));
            }
            Ok(names
                .iter()
                .cloned()
                .zip(record.values().cloned())
                .collect::<Record>())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Value;

    fn sample() -> Vec<Record> {
        vec![Record::from_positional(["2016-06-01 12:00:00", "11.464"])]
    }

    #[test]
    fn test_rename_positional_keys() {
        let renamed =
            rename_columns(&sample(), &["Time".into(), "Air_Temperature".into()]).unwrap();

        let expected: Record = [
            (FieldKey::from("Time"), Value::from("2016-06-01 12:00:00")),
            (FieldKey::from("Air_Temperature"), Value::from("11.464")),
        ]
        .into_iter()
        .collect();
        assert_eq!(renamed, vec![expected]);
    }

    #[test]
    fn test_too_few_names() {
        let result = rename_columns(&sample(), &["Time".into()]);
        match result {
            Err(Error::ColumnCountMismatch {
                record_index,
                expected,
                found,
            }) => {
                assert_eq!(record_index, 0);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Expected ColumnCountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_too_many_names() {
        let result = rename_columns(
            &sample(),
            &["Time".into(), "Air_Temperature".into(), "Extra".into()],
        );
        assert!(matches!(result, Err(Error::ColumnCountMismatch { .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = rename_columns(&sample(), &["Time".into(), "Time".into()]);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_rename_back_to_positions() {
        let named = rename_columns(&sample(), &["a".into(), "b".into()]).unwrap();
        let positional =
            rename_columns(&named, &[FieldKey::Index(0), FieldKey::Index(1)]).unwrap();
        assert_eq!(positional, sample());
    }
}
