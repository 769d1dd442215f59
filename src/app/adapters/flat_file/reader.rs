//! Delimited logger file reader

use super::delimiter_byte;
use crate::app::models::{FieldKey, Record, Value};
use crate::constants::{DEFAULT_DELIMITER, FLOAT_FIX_PATTERN, FLOAT_FIX_REPLACEMENT};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Where record keys come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// No header: keys are zero-based column positions
    #[default]
    Positional,
    /// Field names are taken from this zero-based physical line
    Row(usize),
    /// Field names are supplied by the caller; file content is not consulted
    Explicit(Vec<String>),
}

/// Reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub delimiter: char,
    pub header: HeaderMode,
    /// First physical line to return (1-indexed, inclusive)
    pub first_line: Option<usize>,
    /// Last physical line to return (1-indexed, inclusive)
    pub last_line: Option<usize>,
    /// Restore the leading zero loggers drop from values like `.5` and `-.5`
    pub fix_floats: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header: HeaderMode::Positional,
            first_line: None,
            last_line: None,
            fix_floats: true,
        }
    }
}

impl ReadOptions {
    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_line_range(mut self, first_line: Option<usize>, last_line: Option<usize>) -> Self {
        self.first_line = first_line;
        self.last_line = last_line;
        self
    }

    pub fn without_float_fix(mut self) -> Self {
        self.fix_floats = false;
        self
    }

    fn in_range(&self, line: usize) -> bool {
        self.first_line.is_none_or(|first| line >= first)
            && self.last_line.is_none_or(|last| line <= last)
    }

    fn past_range(&self, line: usize) -> bool {
        self.last_line.is_some_and(|last| line > last)
    }
}

/// Reads delimited logger files into records
#[derive(Debug, Clone)]
pub struct FlatFileReader {
    options: ReadOptions,
    float_fix: Regex,
}

impl FlatFileReader {
    pub fn new(options: ReadOptions) -> Result<Self> {
        delimiter_byte(options.delimiter)?;
        let float_fix = Regex::new(FLOAT_FIX_PATTERN)
            .map_err(|e| Error::configuration(format!("Invalid float fix pattern: {}", e)))?;
        Ok(Self { options, float_fix })
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Read every selected line of a file
    pub fn read_path(&self, path: &Path) -> Result<Vec<Record>> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        let records = self.read_from(file, &path.display().to_string())?;

        debug!("Read {} records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read every selected line from any byte source; `source` names it in
    /// error messages
    ///
    /// Lines are numbered physically, so `\r\n` terminators and blank lines
    /// count the same way a text editor counts them.
    pub fn read_from<R: Read>(&self, input: R, source: &str) -> Result<Vec<Record>> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter_byte(self.options.delimiter)?);

        let mut header: Option<Vec<FieldKey>> = match &self.options.header {
            HeaderMode::Explicit(names) => Some(names.iter().map(FieldKey::from).collect()),
            _ => None,
        };
        let header_line = match self.options.header {
            HeaderMode::Row(row) => Some(row + 1),
            _ => None,
        };

        let mut records = Vec::new();
        for (index, text) in BufReader::new(input).lines().enumerate() {
            let text = text.map_err(|e| Error::io(format!("Failed to read {}", source), e))?;
            let line = index + 1;

            if let Some(header_line) = header_line {
                if line < header_line {
                    continue;
                }
                if line == header_line {
                    header = parse_line(&builder, &text, source)?
                        .map(|row| row.iter().map(|name| FieldKey::from(name.trim())).collect());
                    continue;
                }
            }
            if self.options.past_range(line) {
                break;
            }
            if !self.options.in_range(line) {
                continue;
            }

            // Blank lines never become records
            let Some(row) = parse_line(&builder, &text, source)? else {
                continue;
            };
            if is_blank(&row) {
                continue;
            }

            records.push(self.build_record(&row, header.as_deref(), records.len())?);
        }

        Ok(records)
    }

    fn build_record(
        &self,
        row: &csv::StringRecord,
        header: Option<&[FieldKey]>,
        record_index: usize,
    ) -> Result<Record> {
        let values = row.iter().map(|field| Value::Text(self.fix_float(field)));

        match header {
            None => Ok(row
                .iter()
                .enumerate()
                .map(|(index, _)| FieldKey::Index(index))
                .zip(values)
                .collect()),
            Some(keys) => {
                if keys.len() != row.len() {
                    return Err(Error::column_count_mismatch(
                        record_index,
                        keys.len(),
                        row.len(),
                    ));
                }
                Ok(keys.iter().cloned().zip(values).collect())
            }
        }
    }

    fn fix_float(&self, field: &str) -> String {
        if self.options.fix_floats {
            self.float_fix
                .replace(field, FLOAT_FIX_REPLACEMENT)
                .into_owned()
        } else {
            field.to_string()
        }
    }
}

/// Split one physical line into fields
fn parse_line(
    builder: &csv::ReaderBuilder,
    text: &str,
    source: &str,
) -> Result<Option<csv::StringRecord>> {
    builder
        .from_reader(text.as_bytes())
        .records()
        .next()
        .transpose()
        .map_err(|e| Error::csv(source, "Failed to read line", e))
}

fn is_blank(row: &csv::StringRecord) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}
