//! Delimited record writer

use super::delimiter_byte;
use crate::app::models::Record;
use crate::constants::DEFAULT_DELIMITER;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Sink for flattened records
///
/// Implementations receive records whose values are all text and emit one
/// line per record, optionally preceded by a line of keys taken from the
/// first record.
pub trait FlatFileWriter {
    fn write_records(&mut self, records: &[Record], include_header: bool) -> Result<()>;
}

/// What to do when the destination file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

/// CSV-backed [`FlatFileWriter`]
pub struct CsvFlatFileWriter<W: Write> {
    writer: csv::Writer<W>,
    destination: String,
}

impl CsvFlatFileWriter<File> {
    /// Open `path` for writing, creating parent directories as needed
    pub fn create(path: &Path, delimiter: char, mode: WriteMode) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let file = match mode {
            WriteMode::Truncate => File::create(path),
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(|e| Error::io(format!("Failed to open {} for writing", path.display()), e))?;

        Self::from_writer(file, delimiter, path.display().to_string())
    }
}

impl<W: Write> CsvFlatFileWriter<W> {
    /// Wrap any byte sink; `destination` names it in error messages
    pub fn from_writer(inner: W, delimiter: char, destination: impl Into<String>) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter_byte(delimiter)?)
            .from_writer(inner);

        Ok(Self {
            writer,
            destination: destination.into(),
        })
    }

    /// Flush and hand back the underlying sink
    pub fn into_inner(self) -> Result<W> {
        let destination = self.destination;
        self.writer.into_inner().map_err(|e| {
            Error::io(
                format!("Failed to flush {}", destination),
                e.into_error(),
            )
        })
    }

    fn write_line<I, T>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::csv(self.destination.as_str(), "Failed to write line", e))
    }
}

impl<W: Write> FlatFileWriter for CsvFlatFileWriter<W> {
    fn write_records(&mut self, records: &[Record], include_header: bool) -> Result<()> {
        if include_header {
            if let Some(first) = records.first() {
                self.write_line(first.keys().map(|key| key.to_string()))?;
            }
        }

        for record in records {
            self.write_line(record.values().map(|value| value.to_string()))?;
        }

        self.writer
            .flush()
            .map_err(|e| Error::io(format!("Failed to flush {}", self.destination), e))?;

        debug!("Wrote {} records to {}", records.len(), self.destination);
        Ok(())
    }
}

impl Default for CsvFlatFileWriter<Vec<u8>> {
    fn default() -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_writer(Vec::new()),
            destination: "memory".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FieldKey, Value};
    use tempfile::TempDir;

    fn sample() -> Vec<Record> {
        vec![
            [
                (FieldKey::from("Time"), Value::from("2016-06-01 12:00:00")),
                (FieldKey::from("Air_Temperature"), Value::from("11.464")),
            ]
            .into_iter()
            .collect(),
            [
                (FieldKey::from("Time"), Value::from("2016-06-01 13:00:00")),
                (FieldKey::from("Air_Temperature"), Value::from("11.2")),
            ]
            .into_iter()
            .collect(),
        ]
    }

    #[test]
    fn test_write_with_header() {
        let mut writer = CsvFlatFileWriter::default();
        writer.write_records(&sample(), true).unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            output,
            "Time,Air_Temperature\n2016-06-01 12:00:00,11.464\n2016-06-01 13:00:00,11.2\n"
        );
    }

    #[test]
    fn test_write_without_header_and_custom_delimiter() {
        let mut writer = CsvFlatFileWriter::from_writer(Vec::new(), '\t', "tabs").unwrap();
        writer.write_records(&sample()[..1], false).unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(output, "2016-06-01 12:00:00\t11.464\n");
    }

    #[test]
    fn test_empty_records_write_nothing() {
        let mut writer = CsvFlatFileWriter::default();
        writer.write_records(&[], true).unwrap();
        assert!(writer.into_inner().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.dat");

        let mut writer = CsvFlatFileWriter::create(&path, ',', WriteMode::Truncate).unwrap();
        writer.write_records(&sample()[..1], true).unwrap();
        drop(writer);

        let mut writer = CsvFlatFileWriter::create(&path, ',', WriteMode::Append).unwrap();
        writer.write_records(&sample()[1..], false).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.ends_with("2016-06-01 13:00:00,11.2\n"));

        let mut writer = CsvFlatFileWriter::create(&path, ',', WriteMode::Truncate).unwrap();
        writer.write_records(&sample()[1..], false).unwrap();
        drop(writer);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "2016-06-01 13:00:00,11.2\n");
    }
}
