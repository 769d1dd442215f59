//! Row classification for mixed-array data
//!
//! Array-based loggers write every output array to the same file; the first
//! column of each line is the array id that tells which schema the rest of
//! the line follows. This module splits such records into one stream per
//! array id.
//!
//! - [`classifier`] - Partitioning and array-id filtering
//! - [`buckets`] - The insertion-ordered bucket collection
//!
//! Unknown array ids are not errors: they pass through under their raw value.

pub mod buckets;
pub mod classifier;

#[cfg(test)]
pub mod tests;

pub use buckets::ArrayBuckets;
pub use classifier::{ArrayIdNames, classify_arrays, filter_array_ids};
