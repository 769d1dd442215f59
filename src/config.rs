//! Job configuration and validation.
//!
//! A job describes one pipeline run: which files to read, how to read them,
//! how to resolve and convert their time columns, how to split mixed-array
//! files and where to write the results. Jobs are loaded from TOML; any
//! section left out is either skipped or filled in from the datalogger preset.

use crate::app::adapters::flat_file::{ReadOptions, WriteMode, delimiter_byte};
use crate::app::models::{FieldKey, ResolvedTimestamp, parse_time_zone};
use crate::app::services::datalogger::DataloggerModel;
use crate::app::services::export_adapter::ExportOptions;
use crate::app::services::range_extractor::TimeWindow;
use crate::app::services::row_classifier::ArrayIdNames;
use crate::app::services::time_resolver::format::parse_naive;
use crate::app::services::time_resolver::localize::{AmbiguityPolicy, localize};
use crate::app::services::time_resolver::{ResolveOptions, TimeResolver};
use crate::constants::{
    CANONICAL_TIME_FORMAT, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER,
    DEFAULT_OUTPUT_EXTENSION, DEFAULT_TIME_ZONE,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Layout of the rows in an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// One homogeneous row schema
    Table,
    /// Row schema depends on a leading array id
    MixedArray,
}

/// Time resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Source columns; the logger preset is used when empty
    pub columns: Vec<FieldKey>,
    /// One format per source column; the logger preset is used when empty
    pub formats: Vec<String>,
    pub result_column: FieldKey,
    pub time_zone: String,
    /// Fail on DST folds and gaps
    pub strict: bool,
    pub hour_minute_quirks: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            formats: Vec::new(),
            result_column: FieldKey::from("Time"),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            strict: false,
            hour_minute_quirks: true,
        }
    }
}

impl TimeConfig {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            ambiguity: if self.strict {
                AmbiguityPolicy::Strict
            } else {
                AmbiguityPolicy::PreferStandard
            },
            hour_minute_quirks: self.hour_minute_quirks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub time_zone: String,
}

/// Mixed-array classification settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Discriminator column; the logger preset is used when absent
    pub column: Option<FieldKey>,
    /// Readable bucket names by array id
    pub names: ArrayIdNames,
    /// Keep only these array ids; all are kept when empty
    pub array_ids: Vec<String>,
}

/// Column projection and time window settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Columns kept for tables, and for buckets without their own entry
    pub columns: Option<Vec<FieldKey>>,
    /// Columns kept per bucket name
    pub arrays: HashMap<String, Vec<FieldKey>>,
    /// Inclusive lower bound, `YYYY-mm-dd HH:MM:SS` local to the data's zone
    pub from: Option<String>,
    /// Inclusive upper bound, `YYYY-mm-dd HH:MM:SS` local to the data's zone
    pub to: Option<String>,
}

impl ExtractConfig {
    pub fn columns_for(&self, bucket: Option<&str>) -> Option<&[FieldKey]> {
        bucket
            .and_then(|name| self.arrays.get(name))
            .or(self.columns.as_ref())
            .map(Vec::as_slice)
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

/// Positional renaming settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Names for tables, and for buckets without their own entry
    pub columns: Option<Vec<FieldKey>>,
    /// Names per bucket name
    pub arrays: HashMap<String, Vec<FieldKey>>,
}

impl RenameConfig {
    pub fn names_for(&self, bucket: Option<&str>) -> Option<&[FieldKey]> {
        bucket
            .and_then(|name| self.arrays.get(name))
            .or(self.columns.as_ref())
            .map(Vec::as_slice)
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub delimiter: char,
    pub include_header: bool,
    pub include_time_zone: bool,
    pub extension: String,
    pub mode: WriteMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            delimiter: DEFAULT_DELIMITER,
            include_header: true,
            include_time_zone: false,
            extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            mode: WriteMode::Truncate,
        }
    }
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            include_header: self.include_header,
            include_time_zone: self.include_time_zone,
        }
    }

    /// Destination for one output stream of `source`
    pub fn output_path(&self, source: &Path, bucket: Option<&str>) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let file_name = match bucket {
            Some(bucket) => format!("{}_{}.{}", stem, sanitize(bucket), self.extension),
            None => format!("{}.{}", stem, self.extension),
        };
        self.output_dir.join(file_name)
    }
}

/// Keep bucket names usable as file name parts
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// One configured pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Glob pattern selecting input files
    pub input: String,
    /// Datalogger family; supplies reader, time and discriminator presets
    #[serde(default)]
    pub logger: Option<DataloggerModel>,
    /// Row layout; derived from `logger` when absent
    #[serde(default)]
    pub kind: Option<DataKind>,
    #[serde(default)]
    pub read: Option<ReadOptions>,
    #[serde(default)]
    pub time: Option<TimeConfig>,
    #[serde(default)]
    pub convert: Option<ConvertConfig>,
    #[serde(default)]
    pub classify: Option<ClassifyConfig>,
    #[serde(default)]
    pub extract: Option<ExtractConfig>,
    #[serde(default)]
    pub rename: Option<RenameConfig>,
    #[serde(default)]
    pub export: ExportConfig,
}

impl JobConfig {
    /// Create a job reading `input` with everything else left at defaults
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            logger: None,
            kind: None,
            read: None,
            time: None,
            convert: None,
            classify: None,
            extract: None,
            rename: None,
            export: ExportConfig::default(),
        }
    }

    /// Load and validate a job from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        let config = Self::from_toml_str(&content)?;
        debug!("Loaded job configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a job from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid job configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_logger(mut self, logger: DataloggerModel) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_time(mut self, time: TimeConfig) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_classify(mut self, classify: ClassifyConfig) -> Self {
        self.classify = Some(classify);
        self
    }

    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    pub fn data_kind(&self) -> DataKind {
        match (self.kind, self.logger) {
            (Some(kind), _) => kind,
            (None, Some(logger)) if logger.is_mixed_array() => DataKind::MixedArray,
            _ => DataKind::Table,
        }
    }

    /// Explicit reader settings, else the logger preset, else defaults
    pub fn read_options(&self) -> ReadOptions {
        match (&self.read, self.logger) {
            (Some(read), _) => read.clone(),
            (None, Some(logger)) => logger.read_options(),
            (None, None) => ReadOptions::default(),
        }
    }

    /// Build the time resolver, if time resolution is configured
    pub fn time_resolver(&self) -> Result<Option<TimeResolver>> {
        let Some(time) = &self.time else {
            return Ok(None);
        };

        let (columns, formats) = match (time.columns.is_empty(), self.logger) {
            (true, Some(logger)) => (logger.time_columns(), logger.time_formats()),
            _ => (time.columns.clone(), time.formats.clone()),
        };

        let resolver = TimeResolver::new(
            columns,
            formats,
            time.result_column.clone(),
            &time.time_zone,
        )?
        .with_options(time.resolve_options());
        Ok(Some(resolver))
    }

    /// Discriminator column for mixed-array jobs
    pub fn array_id_column(&self) -> Option<FieldKey> {
        self.classify
            .as_ref()
            .and_then(|classify| classify.column.clone())
            .or_else(|| self.logger.and_then(|logger| logger.array_id_column()))
    }

    /// Zone the exported timestamps are expressed in
    pub fn data_time_zone(&self) -> Option<&str> {
        match (&self.convert, &self.time) {
            (Some(convert), _) => Some(convert.time_zone.as_str()),
            (None, Some(time)) => Some(time.time_zone.as_str()),
            (None, None) => None,
        }
    }

    /// Build the extraction window over the resolved time column
    pub fn time_window(&self) -> Result<Option<TimeWindow>> {
        let Some(extract) = &self.extract else {
            return Ok(None);
        };
        if !extract.is_bounded() {
            return Ok(None);
        }
        let (Some(time), Some(zone)) = (&self.time, self.data_time_zone()) else {
            return Err(Error::configuration(
                "Extraction bounds require a [time] section",
            ));
        };

        // Bounds are wall-clock times in the zone the data ends up in
        let mut window = TimeWindow::new(time.result_column.clone());
        if let Some(from) = &extract.from {
            window = window.from(parse_bound(from, zone)?);
        }
        if let Some(to) = &extract.to {
            window = window.to(parse_bound(to, zone)?);
        }
        Ok(Some(window))
    }

    /// Check the job for settings that would fail before any file is read
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(Error::configuration("Input pattern must not be empty"));
        }
        glob::Pattern::new(&self.input).map_err(|e| {
            Error::configuration(format!("Invalid input pattern '{}': {}", self.input, e))
        })?;

        // Check delimiters and output naming
        delimiter_byte(self.read_options().delimiter)?;
        delimiter_byte(self.export.delimiter)?;
        if self.export.extension.trim().is_empty() {
            return Err(Error::configuration("Output extension must not be empty"));
        }

        // Build the time stages once to surface bad zones and formats
        self.time_resolver()?;
        if let Some(convert) = &self.convert {
            if self.time.is_none() {
                return Err(Error::configuration(
                    "Time zone conversion requires a [time] section",
                ));
            }
            parse_time_zone(&convert.time_zone)?;
        }

        if self.data_kind() == DataKind::MixedArray && self.array_id_column().is_none() {
            return Err(Error::configuration(
                "Mixed-array jobs need a discriminator column ([classify] column or a logger)",
            ));
        }
        if self.data_kind() == DataKind::Table && self.classify.is_some() {
            return Err(Error::configuration(
                "[classify] only applies to mixed-array jobs",
            ));
        }

        // Empty projections would produce empty outputs
        if let Some(extract) = &self.extract {
            let mut empty_lists = extract.columns.iter().chain(extract.arrays.values());
            if empty_lists.any(Vec::is_empty) {
                return Err(Error::configuration("Extract column lists must not be empty"));
            }
        }
        self.time_window()?;

        Ok(())
    }
}

/// Interpret a window bound as local time in `zone`
fn parse_bound(text: &str, zone: &str) -> Result<ResolvedTimestamp> {
    let tz = parse_time_zone(zone)?;
    let naive = parse_naive(text.trim(), CANONICAL_TIME_FORMAT).map_err(|e| {
        Error::configuration(format!(
            "Invalid extraction bound '{}' (expected {}): {}",
            text, CANONICAL_TIME_FORMAT, e
        ))
    })?;
    let local = localize(&naive, tz, AmbiguityPolicy::PreferStandard).map_err(|issue| {
        Error::configuration(format!("Extraction bound '{}' in {}: {}", text, zone, issue))
    })?;
    Ok(ResolvedTimestamp::new(local))
}

/// Default job file location: `<config dir>/campbellsci-parser/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::adapters::flat_file::HeaderMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MIXED_JOB: &str = r#"
input = "data/*.dat"
logger = "CR10X"

[time]
time_zone = "Europe/Stockholm"

[classify]
names = { "100" = "Hourly", "101" = "Daily" }

[extract]
from = "2016-06-07 00:00:00"
to = "2016-06-07 02:00:00"

[rename.arrays]
Hourly = ["Time", "Air_Temperature"]

[export]
output_dir = "out"
include_time_zone = true
"#;

    #[test]
    fn test_mixed_job_uses_logger_presets() {
        let config = JobConfig::from_toml_str(MIXED_JOB).unwrap();

        assert_eq!(config.data_kind(), DataKind::MixedArray);
        assert_eq!(config.read_options().header, HeaderMode::Positional);
        assert_eq!(config.array_id_column(), Some(FieldKey::Index(0)));

        let resolver = config.time_resolver().unwrap().unwrap();
        assert_eq!(resolver.time_zone(), chrono_tz::Europe::Stockholm);
        assert_eq!(resolver.result_column(), &FieldKey::from("Time"));

        let names = config.rename.as_ref().unwrap();
        assert_eq!(names.names_for(Some("Hourly")).unwrap().len(), 2);
        assert!(names.names_for(Some("Daily")).is_none());
        assert!(config.export.include_header);
    }

    #[test]
    fn test_window_bounds_are_local_to_data_zone() {
        let config = JobConfig::from_toml_str(MIXED_JOB).unwrap();
        let window = config.time_window().unwrap().unwrap();

        let from = window.from.unwrap();
        assert_eq!(
            from.to_utc().format(CANONICAL_TIME_FORMAT).to_string(),
            "2016-06-06 22:00:00"
        );
    }

    #[test]
    fn test_positional_and_named_keys_from_toml() {
        let config = JobConfig::from_toml_str(
            r#"
input = "*.dat"
kind = "table"

[time]
columns = [1, "Day", 3]
formats = ["%Y", "%j", "%H%M"]
"#,
        )
        .unwrap();

        let time = config.time.unwrap();
        assert_eq!(
            time.columns,
            vec![FieldKey::Index(1), FieldKey::from("Day"), FieldKey::Index(3)]
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let cases = [
            "input = \"\"",
            "input = \"*.dat\"\n[time]\ncolumns = [1]\nformats = []",
            "input = \"*.dat\"\n[time]\ncolumns = [1]\nformats = [\"%Y\"]\ntime_zone = \"Mars/Base\"",
            "input = \"*.dat\"\nkind = \"mixed_array\"",
            "input = \"*.dat\"\n[extract]\nfrom = \"2016-06-07 00:00:00\"",
            "input = \"*.dat\"\nlogger = \"CR10X\"\n[time]\n[extract]\nfrom = \"yesterday\"",
            "input = \"*.dat\"\nlogger = \"CR9000\"",
            "input = \"*.dat\"\n[export]\ndelimiter = \"§\"",
        ];

        for case in cases {
            assert!(
                JobConfig::from_toml_str(case).is_err(),
                "expected rejection of:\n{}",
                case
            );
        }
    }

    #[test]
    fn test_output_paths() {
        let export = ExportConfig::default();
        let source = Path::new("/data/station1.dat");

        assert_eq!(
            export.output_path(source, None),
            PathBuf::from("output/station1.dat")
        );
        assert_eq!(
            export.output_path(source, Some("Hourly")),
            PathBuf::from("output/station1_Hourly.dat")
        );
        assert_eq!(
            export.output_path(source, Some("a/b")),
            PathBuf::from("output/station1_a_b.dat")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", MIXED_JOB).unwrap();

        let config = JobConfig::load(file.path()).unwrap();
        assert_eq!(config.input, "data/*.dat");

        assert!(matches!(
            JobConfig::load(Path::new("/nonexistent/job.toml")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_default_config_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("campbellsci-parser/config.toml"));
        }
    }
}
