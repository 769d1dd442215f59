//! Pipeline run statistics

use std::path::PathBuf;

/// Totals for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Input files read
    pub files_processed: usize,

    /// Records produced by the reader across all files
    pub records_read: usize,

    /// Records written across all outputs
    pub records_written: usize,

    /// Array buckets seen across mixed-array files
    pub buckets: usize,

    /// Files written, in the order they were written
    pub outputs: Vec<PathBuf>,

    pub processing_time_ms: u128,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the totals of one input file into the run totals
    pub fn absorb(&mut self, file: FileStats) {
        self.files_processed += 1;
        self.records_read += file.records_read;
        self.records_written += file.records_written;
        self.buckets += file.buckets;
        self.outputs.extend(file.outputs);
    }

    /// Share of read records that made it to an output, as a percentage
    pub fn retention_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_written as f64 / self.records_read as f64) * 100.0
        }
    }
}

/// Totals for one input file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    pub records_read: usize,
    pub records_written: usize,
    pub buckets: usize,
    pub outputs: Vec<PathBuf>,
}
