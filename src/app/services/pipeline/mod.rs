//! Job pipeline
//!
//! Runs one configured job over every input file matching its pattern:
//!
//! 1. read records with the job's reader settings
//! 2. resolve the time columns and convert the zone, if configured
//! 3. for mixed-array files, filter by array id and classify into buckets
//! 4. per stream, extract columns inside the time window and rename them
//! 5. export each stream to `<output_dir>/<stem>.<ext>` (tables) or
//!    `<output_dir>/<stem>_<bucket>.<ext>` (buckets)
//!
//! The first failing file aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use campbellsci_parser::{JobConfig, Pipeline};
//! use std::path::Path;
//!
//! # fn main() -> campbellsci_parser::Result<()> {
//! let job = JobConfig::load(Path::new("jobs/station1.toml"))?;
//! let stats = Pipeline::run(&job)?;
//! println!("{} records written", stats.records_written);
//! # Ok(())
//! # }
//! ```

pub mod runner;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use runner::Pipeline;
pub use stats::{FileStats, PipelineStats};
