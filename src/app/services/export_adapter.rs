//! Record export to flat files
//!
//! Resolved timestamps are the only non-text values in a record. Exporting
//! turns them back into canonical text and hands the rows to a
//! [`FlatFileWriter`], which owns line construction.

use crate::app::adapters::flat_file::FlatFileWriter;
use crate::app::models::{Record, Value};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Export switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Emit the first record's keys as a header line
    pub include_header: bool,
    /// Append the UTC offset (`+0200`) to exported timestamps
    pub include_time_zone: bool,
}

impl ExportOptions {
    pub fn with_header(mut self) -> Self {
        self.include_header = true;
        self
    }

    pub fn with_time_zone(mut self) -> Self {
        self.include_time_zone = true;
        self
    }
}

/// Replace every timestamp value with its canonical text
pub fn flatten_records(records: &[Record], include_time_zone: bool) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(key, value)| {
                    let flat = match value {
                        Value::Timestamp(timestamp) => {
                            Value::Text(timestamp.format_canonical(include_time_zone))
                        }
                        Value::Text(_) => value.clone(),
                    };
                    (key.clone(), flat)
                })
                .collect()
        })
        .collect()
}

/// Flatten `records` and write them through `writer`
pub fn export_records<W>(records: &[Record], writer: &mut W, options: ExportOptions) -> Result<()>
where
    W: FlatFileWriter + ?Sized,
{
    let flat = flatten_records(records, options.include_time_zone);
    writer.write_records(&flat, options.include_header)
}
