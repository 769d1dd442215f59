//! Error handling for datalogger parsing operations.
//!
//! Separates malformed time data (parse, zone, DST ambiguity) from record
//! shape mismatches (missing columns, wrong value type, arity) so callers can
//! decide which failures are worth reporting per file.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the datalogger parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds raised by the parser core and its adapters
#[derive(Error, Debug)]
pub enum Error {
    /// Composite time text does not match the composite format
    #[error("Time parsing error in record {record_index}: '{text}' does not match '{format}'")]
    TimeParse {
        record_index: usize,
        text: String,
        format: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// Time zone identifier is not in the IANA database
    #[error("Unknown time zone: '{zone}'")]
    UnknownTimeZone { zone: String },

    /// Local time falls into a DST fold or gap and strict mode is on
    #[error("Ambiguous local time in record {record_index}: {local_time} in {zone} ({reason})")]
    AmbiguousTime {
        record_index: usize,
        local_time: String,
        zone: String,
        reason: String,
    },

    /// Column key missing from a record
    #[error("Column '{column}' not found in record {record_index}")]
    InvalidColumn { column: String, record_index: usize },

    /// Column expected to hold a resolved timestamp holds text
    #[error("Column '{column}' in record {record_index} does not hold a resolved timestamp")]
    NotATimestamp { column: String, record_index: usize },

    /// Supplied names do not match the record's key count
    #[error(
        "Column count mismatch in record {record_index}: expected {expected} names, found {found}"
    )]
    ColumnCountMismatch {
        record_index: usize,
        expected: usize,
        found: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Delimited file could not be read or written
    #[error("CSV error in file '{file}': {message}")]
    Csv {
        file: String,
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Invalid job or operation configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },
}

impl Error {
    /// Create a time parsing error for a record
    pub fn time_parse(
        record_index: usize,
        text: impl Into<String>,
        format: impl Into<String>,
        source: Option<chrono::ParseError>,
    ) -> Self {
        Self::TimeParse {
            record_index,
            text: text.into(),
            format: format.into(),
            source,
        }
    }

    /// Create an unknown time zone error
    pub fn unknown_time_zone(zone: impl Into<String>) -> Self {
        Self::UnknownTimeZone { zone: zone.into() }
    }

    /// Create an ambiguous local time error
    pub fn ambiguous_time(
        record_index: usize,
        local_time: impl Into<String>,
        zone: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::AmbiguousTime {
            record_index,
            local_time: local_time.into(),
            zone: zone.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing column error
    pub fn invalid_column(column: impl ToString, record_index: usize) -> Self {
        Self::InvalidColumn {
            column: column.to_string(),
            record_index,
        }
    }

    /// Create a not-a-timestamp error
    pub fn not_a_timestamp(column: impl ToString, record_index: usize) -> Self {
        Self::NotATimestamp {
            column: column.to_string(),
            record_index,
        }
    }

    /// Create a column count mismatch error
    pub fn column_count_mismatch(record_index: usize, expected: usize, found: usize) -> Self {
        Self::ColumnCountMismatch {
            record_index,
            expected,
            found,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(file: impl Into<String>, message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// True for errors caused by malformed time data
    pub fn is_time_data_error(&self) -> bool {
        matches!(
            self,
            Self::TimeParse { .. } | Self::UnknownTimeZone { .. } | Self::AmbiguousTime { .. }
        )
    }

    /// True for errors caused by records not having the expected shape
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidColumn { .. }
                | Self::NotATimestamp { .. }
                | Self::ColumnCountMismatch { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
