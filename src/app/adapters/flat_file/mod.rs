//! Delimited flat-file adapters
//!
//! The parser core works on materialized [`Record`](crate::app::models::Record)
//! sequences and never touches files. These adapters are the boundary: the
//! reader turns a logger file into records, the writer turns records back
//! into delimited lines. Both own their file handle for the duration of one
//! call, so it is released on every exit path.

pub mod reader;
pub mod writer;

pub use reader::{FlatFileReader, HeaderMode, ReadOptions};
pub use writer::{CsvFlatFileWriter, FlatFileWriter, WriteMode};

use crate::error::{Error, Result};

/// Convert a delimiter character to the single byte the CSV engine expects
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                delimiter
            ))
        })
}
