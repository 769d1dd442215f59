//! Data models for datalogger processing
//!
//! This module contains the record representation shared by every stage:
//! ordered field records, their keys and values, and zone-aware resolved
//! timestamps.

pub mod record;
pub mod timestamp;

pub use record::{FieldKey, Record, Value};
pub use timestamp::{ResolvedTimestamp, parse_time_zone};
