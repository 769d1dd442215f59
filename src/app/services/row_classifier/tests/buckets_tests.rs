//! Tests for the bucket collection

use super::*;
use crate::app::services::row_classifier::ArrayBuckets;

#[test]
fn test_push_creates_and_appends() {
    let records = create_mixed_array_records();
    let mut buckets = ArrayBuckets::new();

    buckets.push("Hourly", records[0].clone());
    buckets.push("Daily", records[1].clone());
    buckets.push("Hourly", records[2].clone());

    assert_eq!(buckets.len(), 2);
    assert!(buckets.contains("Daily"));
    assert_eq!(buckets.get("Hourly").unwrap().len(), 2);
    assert_eq!(buckets.total_records(), 3);
}

#[test]
fn test_into_iter_preserves_creation_order() {
    let records = create_mixed_array_records();
    let mut buckets = ArrayBuckets::new();
    buckets.push("b", records[0].clone());
    buckets.push("a", records[1].clone());

    let names: Vec<String> = buckets.into_iter().map(|(name, _)| name).collect();

    assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
}
