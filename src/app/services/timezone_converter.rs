//! Time zone re-projection of resolved timestamp columns
//!
//! Conversion never recomputes a time from text: the instant stays the same
//! and only the attached zone changes.

use crate::app::models::{FieldKey, Record, Value, parse_time_zone};
use crate::error::{Error, Result};

/// Re-express `column` of every record in `time_zone`
///
/// Fails with `InvalidColumn` when a record lacks the column and with
/// `NotATimestamp` when the column still holds text.
pub fn convert_time_zone(
    records: &[Record],
    column: &FieldKey,
    time_zone: &str,
) -> Result<Vec<Record>> {
    let zone = parse_time_zone(time_zone)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let timestamp = match record.get(column) {
                Some(Value::Timestamp(timestamp)) => timestamp,
                Some(Value::Text(_)) => return Err(Error::not_a_timestamp(column, index)),
                None => return Err(Error::invalid_column(column, index)),
            };

            let mut converted = record.clone();
            converted.insert(column.clone(), timestamp.with_time_zone(zone));
            Ok(converted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::time_resolver::parse_time;
    use chrono_tz::{America::Vancouver, Europe::Stockholm};

    fn resolved_records() -> Vec<Record> {
        let raw = vec![
            Record::from_positional(["100", "2016", "159", "0", "11.273"]),
            Record::from_positional(["100", "2016", "159", "100", "11.464"]),
        ];
        parse_time(
            &raw,
            &[1usize.into(), 2usize.into(), 3usize.into()],
            &["%Y", "%j", "%H%M"],
            "Timestamp",
            "Europe/Stockholm",
        )
        .unwrap()
    }

    #[test]
    fn test_conversion_preserves_instant() {
        let records = resolved_records();
        let column = FieldKey::from("Timestamp");

        let converted = convert_time_zone(&records, &column, "America/Vancouver").unwrap();

        for (before, after) in records.iter().zip(&converted) {
            let before = before.get_timestamp(&column).unwrap();
            let after = after.get_timestamp(&column).unwrap();
            assert_eq!(before, after);
            assert_eq!(after.time_zone(), Vancouver);
        }
        assert_eq!(
            converted[0].get_timestamp(&column).unwrap().to_string(),
            "2016-06-06 15:00:00"
        );
    }

    #[test]
    fn test_round_trip_returns_identical_instant() {
        let records = resolved_records();
        let column = FieldKey::from("Timestamp");

        let away = convert_time_zone(&records, &column, "Asia/Tokyo").unwrap();
        let back = convert_time_zone(&away, &column, "Europe/Stockholm").unwrap();

        assert_eq!(back, records);
        let timestamp = back[1].get_timestamp(&column).unwrap();
        assert_eq!(timestamp.time_zone(), Stockholm);
        assert_eq!(timestamp.to_string(), "2016-06-07 01:00:00");
    }

    #[test]
    fn test_other_columns_untouched() {
        let records = resolved_records();
        let converted =
            convert_time_zone(&records, &FieldKey::from("Timestamp"), "UTC").unwrap();
        let keys: Vec<_> = converted[0].keys().cloned().collect();
        let original_keys: Vec<_> = records[0].keys().cloned().collect();
        assert_eq!(keys, original_keys);
        assert_eq!(converted[0].get_text(&4usize.into()), Some("11.273"));
    }

    #[test]
    fn test_missing_column() {
        let records = resolved_records();
        let result = convert_time_zone(&records, &FieldKey::from("Time"), "UTC");
        assert!(matches!(result, Err(Error::InvalidColumn { .. })));
    }

    #[test]
    fn test_text_column_is_not_a_timestamp() {
        let records = vec![Record::from_positional(["2016-06-01 12:00:00", "11.464"])];
        let result = convert_time_zone(&records, &FieldKey::Index(0), "UTC");
        assert!(matches!(
            result,
            Err(Error::NotATimestamp { record_index: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_zone() {
        let records = resolved_records();
        let result = convert_time_zone(&records, &FieldKey::from("Timestamp"), "Nowhere/Land");
        assert!(matches!(result, Err(Error::UnknownTimeZone { .. })));
    }
}
