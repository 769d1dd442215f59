//! Test utilities for row classification tests

use crate::app::models::Record;
use crate::app::services::row_classifier::ArrayIdNames;

// Test modules
mod buckets_tests;

/// Two hourly arrays (100) and one daily array (101), interleaved
pub fn create_mixed_array_records() -> Vec<Record> {
    vec![
        Record::from_positional(["100", "2016", "159", "0", "11.273"]),
        Record::from_positional(["101", "2016", "159", "0", "17.320"]),
        Record::from_positional(["100", "2016", "159", "100", "11.464"]),
        Record::from_positional(["102", "2016", "159", "100", "3.2", "88"]),
    ]
}

pub fn create_names(pairs: &[(&str, &str)]) -> ArrayIdNames {
    pairs
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}
