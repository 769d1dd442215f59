//! Campbell Scientific Datalogger Parser Library
//!
//! A Rust library for reading Campbell Scientific datalogger files and
//! turning their raw text columns into zone-aware, classified records.
//!
//! This library provides tools for:
//! - Reading delimited logger files with positional, row or explicit headers
//! - Resolving multi-column logger times (year, day of year, hour/minute)
//!   into timestamps in an IANA time zone, with an explicit DST policy
//! - Re-expressing resolved timestamps in another time zone
//! - Splitting CR10X mixed-array files into one stream per array id
//! - Extracting columns inside a time window and renaming them
//! - Writing records back to delimited files
//!
//! The transformation stages work on in-memory record sequences and return
//! new sequences; only the flat-file adapters touch the file system.
//!
//! # Example
//!
//! ```rust
//! use campbellsci_parser::{FieldKey, Record, classify_arrays, parse_time};
//! use std::collections::HashMap;
//!
//! # fn main() -> campbellsci_parser::Result<()> {
//! let raw = vec![
//!     Record::from_positional(["100", "2016", "159", "0", "11.273"]),
//!     Record::from_positional(["101", "2016", "159", "0", "17.320"]),
//! ];
//!
//! let resolved = parse_time(
//!     &raw,
//!     &[FieldKey::Index(1), FieldKey::Index(2), FieldKey::Index(3)],
//!     &["%Y", "%j", "%H%M"],
//!     "Time",
//!     "Europe/Stockholm",
//! )?;
//!
//! let names = HashMap::from([("100".to_string(), "Hourly".to_string())]);
//! let buckets = classify_arrays(&resolved, &FieldKey::Index(0), Some(&names))?;
//! assert_eq!(buckets.get("Hourly").map(|records| records.len()), Some(1));
//! assert_eq!(buckets.get("101").map(|records| records.len()), Some(1));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod column_renamer;
        pub mod datalogger;
        pub mod export_adapter;
        pub mod pipeline;
        pub mod range_extractor;
        pub mod row_classifier;
        pub mod time_resolver;
        pub mod timezone_converter;
    }
    pub mod adapters {
        pub mod flat_file;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::flat_file::{
    CsvFlatFileWriter, FlatFileReader, FlatFileWriter, HeaderMode, ReadOptions, WriteMode,
};
pub use app::models::{FieldKey, Record, ResolvedTimestamp, Value};
pub use app::services::column_renamer::rename_columns;
pub use app::services::datalogger::DataloggerModel;
pub use app::services::export_adapter::{ExportOptions, export_records};
pub use app::services::pipeline::{Pipeline, PipelineStats};
pub use app::services::range_extractor::{TimeWindow, extract_columns};
pub use app::services::row_classifier::{ArrayBuckets, ArrayIdNames, classify_arrays};
pub use app::services::time_resolver::{AmbiguityPolicy, ResolveOptions, TimeResolver, parse_time};
pub use app::services::timezone_converter::convert_time_zone;
pub use config::JobConfig;
pub use error::{Error, Result};
