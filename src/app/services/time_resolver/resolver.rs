//! Time resolution over record sequences

use super::format::CompositeTime;
use super::localize::{AmbiguityPolicy, localize};
use crate::app::models::{FieldKey, Record, ResolvedTimestamp, Value, parse_time_zone};
use crate::error::{Error, Result};
use chrono_tz::Tz;

/// Options that change how time text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// DST fold/gap handling
    pub ambiguity: AmbiguityPolicy,
    /// Zero-pad `%H%M` values and read `2400` as next-day midnight
    pub hour_minute_quirks: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            ambiguity: AmbiguityPolicy::PreferStandard,
            hour_minute_quirks: true,
        }
    }
}

impl ResolveOptions {
    /// Fail on DST folds and gaps instead of reading them as standard time
    pub fn strict(mut self) -> Self {
        self.ambiguity = AmbiguityPolicy::Strict;
        self
    }

    /// Parse `%H%M` values exactly as written
    pub fn without_hour_minute_quirks(mut self) -> Self {
        self.hour_minute_quirks = false;
        self
    }
}

/// Combines time columns into one resolved timestamp column
///
/// The source columns are read in the configured order, joined with their
/// formats, parsed and localised. In the output the source columns are gone
/// and the result column sits where the first of them was.
#[derive(Debug, Clone)]
pub struct TimeResolver {
    columns: Vec<FieldKey>,
    formats: Vec<String>,
    result_column: FieldKey,
    time_zone: Tz,
    options: ResolveOptions,
}

impl TimeResolver {
    /// Create a resolver; fails on an unknown zone or mismatched lists
    pub fn new(
        columns: Vec<FieldKey>,
        formats: Vec<String>,
        result_column: impl Into<FieldKey>,
        time_zone: &str,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::configuration("At least one time column is required"));
        }
        if columns.len() != formats.len() {
            return Err(Error::configuration(format!(
                "{} time columns given with {} formats",
                columns.len(),
                formats.len()
            )));
        }

        Ok(Self {
            columns,
            formats,
            result_column: result_column.into(),
            time_zone: parse_time_zone(time_zone)?,
            options: ResolveOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn result_column(&self) -> &FieldKey {
        &self.result_column
    }

    /// Resolve every record, failing on the first record that cannot be
    /// resolved
    pub fn resolve(&self, records: &[Record]) -> Result<Vec<Record>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| self.resolve_record(index, record))
            .collect()
    }

    /// Resolve a single record; `record_index` is used in error reports
    pub fn resolve_record(&self, record_index: usize, record: &Record) -> Result<Record> {
        let timestamp = self.resolve_timestamp(record_index, record)?;

        let first_position = self
            .columns
            .iter()
            .filter_map(|column| record.position(column))
            .min()
            .unwrap_or(0);

        let mut resolved =
            Record::with_capacity((record.len() + 1).saturating_sub(self.columns.len()));
        for (position, (key, value)) in record.iter().enumerate() {
            if position == first_position {
                resolved.insert(self.result_column.clone(), Value::Timestamp(timestamp));
            }
            if self.columns.contains(key) || *key == self.result_column {
                continue;
            }
            resolved.insert(key.clone(), value.clone());
        }

        Ok(resolved)
    }

    /// Parse and localise the time columns of one record
    pub fn resolve_timestamp(
        &self,
        record_index: usize,
        record: &Record,
    ) -> Result<ResolvedTimestamp> {
        let mut values = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let value = record
                .get(column)
                .ok_or_else(|| Error::invalid_column(column, record_index))?;
            match value {
                Value::Text(text) => values.push(text.as_str()),
                Value::Timestamp(timestamp) => {
                    return Err(Error::time_parse(
                        record_index,
                        timestamp.to_string(),
                        self.formats.join(" "),
                        None,
                    ));
                }
            }
        }

        let composite =
            CompositeTime::compose(&values, &self.formats, self.options.hour_minute_quirks);
        let naive = composite.parse().map_err(|source| {
            Error::time_parse(
                record_index,
                composite.text.clone(),
                composite.format.clone(),
                Some(source),
            )
        })?;

        let localized =
            localize(&naive, self.time_zone, self.options.ambiguity).map_err(|issue| {
                Error::ambiguous_time(
                    record_index,
                    naive.to_string(),
                    self.time_zone.name(),
                    issue.to_string(),
                )
            })?;

        Ok(ResolvedTimestamp::new(localized))
    }
}

/// Resolve time columns of `records` into `result_column` in `time_zone`
/// with default options
pub fn parse_time(
    records: &[Record],
    columns: &[FieldKey],
    formats: &[&str],
    result_column: impl Into<FieldKey>,
    time_zone: &str,
) -> Result<Vec<Record>> {
    TimeResolver::new(
        columns.to_vec(),
        formats.iter().map(|f| f.to_string()).collect(),
        result_column,
        time_zone,
    )?
    .resolve(records)
}
