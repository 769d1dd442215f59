//! Column projection and timestamp window filtering

use crate::app::models::{FieldKey, Record, ResolvedTimestamp, Value};
use crate::error::{Error, Result};

/// Inclusive timestamp window over a resolved timestamp column
///
/// An omitted bound leaves that side open. A window whose lower bound is
/// after its upper bound matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub column: FieldKey,
    pub from: Option<ResolvedTimestamp>,
    pub to: Option<ResolvedTimestamp>,
}

impl TimeWindow {
    pub fn new(column: impl Into<FieldKey>) -> Self {
        Self {
            column: column.into(),
            from: None,
            to: None,
        }
    }

    pub fn from(mut self, from: ResolvedTimestamp) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: ResolvedTimestamp) -> Self {
        self.to = Some(to);
        self
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, timestamp: &ResolvedTimestamp) -> bool {
        self.from.as_ref().is_none_or(|from| timestamp >= from)
            && self.to.as_ref().is_none_or(|to| timestamp <= to)
    }

    /// Whether a record falls inside the window
    fn admits(&self, record: &Record, index: usize) -> Result<bool> {
        match record.get(&self.column) {
            None => Err(Error::invalid_column(&self.column, index)),
            Some(_) if !self.is_bounded() => Ok(true),
            Some(Value::Timestamp(timestamp)) => Ok(self.contains(timestamp)),
            Some(Value::Text(_)) => Err(Error::not_a_timestamp(&self.column, index)),
        }
    }
}

/// Keep `columns` (in the given order) of every record inside `window`
///
/// Every record is checked for the retained columns and the window column,
/// including records outside the window, so shape errors surface regardless
/// of the data's time span.
pub fn extract_columns(
    records: &[Record],
    columns: &[FieldKey],
    window: Option<&TimeWindow>,
) -> Result<Vec<Record>> {
    if columns.is_empty() {
        return Err(Error::configuration("No columns selected for extraction"));
    }

    let mut extracted = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let admitted = match window {
            Some(window) => window.admits(record, index)?,
            None => true,
        };

        let mut projected = Record::with_capacity(columns.len());
        for column in columns {
            let value = record
                .get(column)
                .ok_or_else(|| Error::invalid_column(column, index))?;
            projected.insert(column.clone(), value.clone());
        }

        if admitted {
            extracted.push(projected);
        }
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::time_resolver::parse_time;
    use chrono::Duration;

    fn hourly_records() -> Vec<Record> {
        let raw: Vec<Record> = ["0", "100", "200", "300"]
            .into_iter()
            .map(|hour| Record::from_positional(["100", "2016", "159", hour, "11.2"]))
            .collect();
        parse_time(
            &raw,
            &[1usize.into(), 2usize.into(), 3usize.into()],
            &["%Y", "%j", "%H%M"],
            "Time",
            "Europe/Stockholm",
        )
        .unwrap()
    }

    fn time_of(record: &Record) -> ResolvedTimestamp {
        *record.get_timestamp(&"Time".into()).unwrap()
    }

    fn columns() -> Vec<FieldKey> {
        vec!["Time".into(), FieldKey::Index(4)]
    }

    #[test]
    fn test_projection_order_follows_requested_columns() {
        let records = hourly_records();
        let requested = vec![FieldKey::Index(4), FieldKey::Index(0)];

        let extracted = extract_columns(&records, &requested, None).unwrap();

        assert_eq!(extracted.len(), 4);
        let keys: Vec<_> = extracted[0].keys().cloned().collect();
        assert_eq!(keys, requested);
    }

    #[test]
    fn test_equal_bounds_select_exact_instant() {
        let records = hourly_records();
        let t1 = time_of(&records[1]);
        let window = TimeWindow::new("Time").from(t1).to(t1);

        let extracted = extract_columns(&records, &columns(), Some(&window)).unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(time_of(&extracted[0]), t1);
    }

    #[test]
    fn test_bounds_are_inclusive_and_zone_independent() {
        let records = hourly_records();
        let from = time_of(&records[1]).with_time_zone(chrono_tz::UTC);
        let to = time_of(&records[2]).with_time_zone(chrono_tz::Asia::Tokyo);
        let window = TimeWindow::new("Time").from(from).to(to);

        let extracted = extract_columns(&records, &columns(), Some(&window)).unwrap();

        assert_eq!(extracted.len(), 2);
    }

    #[test]
    fn test_open_bounds() {
        let records = hourly_records();
        let t2 = time_of(&records[2]);

        let lower_only = TimeWindow::new("Time").from(t2);
        let upper_only = TimeWindow::new("Time").to(t2);

        assert_eq!(
            extract_columns(&records, &columns(), Some(&lower_only))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            extract_columns(&records, &columns(), Some(&upper_only))
                .unwrap()
                .len(),
            3
        );
    }

    #[test]
    fn test_inverted_bounds_give_empty_result() {
        let records = hourly_records();
        let t0 = time_of(&records[0]);
        let window = TimeWindow::new("Time")
            .from(ResolvedTimestamp::from_utc(
                t0.to_utc() + Duration::hours(2),
                chrono_tz::UTC,
            ))
            .to(t0);

        let extracted = extract_columns(&records, &columns(), Some(&window)).unwrap();

        assert!(extracted.is_empty());
    }

    #[test]
    fn test_missing_retained_column() {
        let records = hourly_records();
        let result = extract_columns(&records, &[FieldKey::Index(9)], None);
        assert!(matches!(result, Err(Error::InvalidColumn { .. })));
    }

    #[test]
    fn test_missing_window_column() {
        let records = hourly_records();
        let window = TimeWindow::new("Timestamp");
        let result = extract_columns(&records, &columns(), Some(&window));
        assert!(matches!(result, Err(Error::InvalidColumn { .. })));
    }

    #[test]
    fn test_bounds_on_text_column_fail() {
        let records = hourly_records();
        let window = TimeWindow::new(FieldKey::Index(4)).from(time_of(&records[0]));
        let result = extract_columns(&records, &columns(), Some(&window));
        assert!(matches!(
            result,
            Err(Error::NotATimestamp { record_index: 0, .. })
        ));
    }

    #[test]
    fn test_unbounded_window_on_text_column_only_checks_presence() {
        let records = hourly_records();
        let window = TimeWindow::new(FieldKey::Index(4));
        let extracted = extract_columns(&records, &columns(), Some(&window)).unwrap();
        assert_eq!(extracted.len(), records.len());
    }

    #[test]
    fn test_empty_column_list_is_rejected() {
        let records = hourly_records();
        assert!(matches!(
            extract_columns(&records, &[], None),
            Err(Error::Configuration { .. })
        ));
    }
}
