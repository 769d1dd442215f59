//! Test suite for the job pipeline
//!
//! Shared fixtures write logger files into a temporary directory and build
//! jobs pointing at them.

use crate::config::{ExportConfig, JobConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;


/// CR10X-style mixed-array lines: arrays 100 and 101, one stray 102
pub const MIXED_ARRAY_LINES: &str = "\
100,2016,159,0,11.273
101,2016,159,0,17.320
100,2016,159,100,11.464
100,2016,159,200,.521
102,2016,159,200,1.5,2.5
";

/// CR1000-style TOA5 table
pub const TOA5_LINES: &str = "\
\"TOA5\",\"Station\",\"CR1000\",\"1234\",\"CR1000.Std.28\",\"CPU:met.CR1\",\"1234\",\"Hourly\"
\"TIMESTAMP\",\"RECORD\",\"AirTC_Avg\"
\"TS\",\"RN\",\"Deg C\"
\"\",\"\",\"Avg\"
\"2016-06-07 00:00:00\",0,11.464
\"2016-06-07 01:00:00\",1,.25
\"2016-06-07 02:00:00\",2,10.1
";

/// Write `content` as `name` inside `dir`
pub fn write_input(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Job reading `*.dat` from the input directory and writing to `out/`
pub fn create_job(temp_dir: &TempDir) -> JobConfig {
    let input = temp_dir.path().join("in");
    fs::create_dir_all(&input).unwrap();

    JobConfig::new(input.join("*.dat").display().to_string()).with_export(ExportConfig {
        output_dir: temp_dir.path().join("out"),
        extension: "csv".to_string(),
        ..ExportConfig::default()
    })
}

/// Read an output file into its lines
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
