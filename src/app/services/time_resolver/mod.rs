//! Time resolution for datalogger records
//!
//! Loggers spread a single observation time across several text columns
//! (year, day of year, hour/minute; or one `TIMESTAMP` column on table
//! loggers). This module turns those columns into one zone-aware
//! [`ResolvedTimestamp`](crate::app::models::ResolvedTimestamp).
//!
//! ## Architecture
//!
//! - [`format`] - Composite text/format construction and naive parsing
//! - [`localize`] - Attaching a time zone, including DST fold/gap policy
//! - [`resolver`] - Record-level orchestration and column replacement
//!
//! ## Usage
//!
//! ```rust
//! use campbellsci_parser::app::models::{FieldKey, Record};
//! use campbellsci_parser::app::services::time_resolver::TimeResolver;
//!
//! # fn example() -> campbellsci_parser::Result<()> {
//! let records = vec![Record::from_positional(["100", "2016", "159", "0", "11.273"])];
//! let resolver = TimeResolver::new(
//!     vec![FieldKey::Index(1), FieldKey::Index(2), FieldKey::Index(3)],
//!     vec!["%Y".to_string(), "%j".to_string(), "%H%M".to_string()],
//!     "Timestamp",
//!     "Europe/Stockholm",
//! )?;
//!
//! let resolved = resolver.resolve(&records)?;
//! assert_eq!(resolved[0].len(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod format;
pub mod localize;
pub mod resolver;

#[cfg(test)]
pub mod tests;

pub use localize::{AmbiguityPolicy, LocalTimeIssue};
pub use resolver::{ResolveOptions, TimeResolver, parse_time};
