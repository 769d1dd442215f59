//! Test utilities for time resolution tests

use crate::app::models::{FieldKey, Record, Value};


/// Named-column record with year, day-of-year and hour/minute columns
pub fn create_named_record(year: &str, day: &str, hour: &str, temperature: &str) -> Record {
    [
        ("Year", year),
        ("Day", day),
        ("Hour", hour),
        ("Air_Temperature", temperature),
    ]
    .into_iter()
    .map(|(key, value)| (FieldKey::from(key), Value::from(value)))
    .collect()
}

/// Mixed-array style record: array id, year, day, hour/minute, value
pub fn create_array_record(array_id: &str, hour: &str, value: &str) -> Record {
    Record::from_positional([array_id, "2016", "159", hour, value])
}

pub fn time_columns() -> Vec<FieldKey> {
    vec!["Year".into(), "Day".into(), "Hour".into()]
}

pub fn time_formats() -> Vec<String> {
    vec!["%Y".to_string(), "%j".to_string(), "%H%M".to_string()]
}
