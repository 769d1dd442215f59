//! Job execution over input files

use super::stats::{FileStats, PipelineStats};
use crate::app::adapters::flat_file::{CsvFlatFileWriter, FlatFileReader, WriteMode};
use crate::app::models::{FieldKey, Record};
use crate::app::services::column_renamer::rename_columns;
use crate::app::services::export_adapter::{ExportOptions, export_records};
use crate::app::services::range_extractor::{TimeWindow, extract_columns};
use crate::app::services::row_classifier::{classify_arrays, filter_array_ids};
use crate::app::services::time_resolver::TimeResolver;
use crate::app::services::timezone_converter::convert_time_zone;
use crate::config::{DataKind, JobConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A validated job, ready to run over its input files
#[derive(Debug)]
pub struct Pipeline {
    config: JobConfig,
    reader: FlatFileReader,
    resolver: Option<TimeResolver>,
    window: Option<TimeWindow>,
}

impl Pipeline {
    /// Validate `config` and build the stages it describes
    pub fn new(config: &JobConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            reader: FlatFileReader::new(config.read_options())?,
            resolver: config.time_resolver()?,
            window: config.time_window()?,
            config: config.clone(),
        })
    }

    /// Run a job from start to finish
    pub fn run(config: &JobConfig) -> Result<PipelineStats> {
        Self::new(config)?.process_all()
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Input files matching the job's pattern, in path order
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let entries = glob::glob(&self.config.input).map_err(|e| {
            Error::configuration(format!("Invalid input pattern '{}': {}", self.config.input, e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().display().to_string();
                Error::io(format!("Failed to access {}", path), e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        debug!(
            "Found {} input files matching {}",
            files.len(),
            self.config.input
        );
        Ok(files)
    }

    /// Process every input file; the first failing file aborts the run
    pub fn process_all(&self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        let files = self.discover_files()?;
        if files.is_empty() {
            warn!("No input files match {}", self.config.input);
        }

        let mut stats = PipelineStats::new();
        for path in &files {
            stats.absorb(self.process_file(path)?);
        }
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Processed {} files: {} records read, {} written",
            stats.files_processed, stats.records_read, stats.records_written
        );
        Ok(stats)
    }

    /// Read, transform and export one input file
    ///
    /// Every stream of the file is prepared before the first output is
    /// written, so a failing stream leaves no partial outputs behind.
    pub fn process_file(&self, path: &Path) -> Result<FileStats> {
        let records = self.reader.read_path(path)?;
        info!("Processing {} ({} records)", path.display(), records.len());

        let mut file_stats = FileStats {
            records_read: records.len(),
            ..FileStats::default()
        };

        // Excluded arrays may carry a different time layout
        let records = self.select_array_ids(records)?;
        let records = self.resolve_time(records)?;

        let mut prepared_streams = Vec::new();
        for (bucket, stream) in self.split_streams(records, &mut file_stats)? {
            let prepared = self.prepare_stream(bucket.as_deref(), &stream)?;
            if prepared.is_empty() {
                debug!(
                    "Nothing to write for {} {}",
                    path.display(),
                    bucket.as_deref().unwrap_or("table")
                );
                continue;
            }
            prepared_streams.push((bucket, prepared));
        }

        // Write outputs
        for (bucket, prepared) in prepared_streams {
            let output = self.config.export.output_path(path, bucket.as_deref());
            self.write_stream(&output, &prepared)?;
            file_stats.records_written += prepared.len();
            file_stats.outputs.push(output);
        }

        Ok(file_stats)
    }

    /// Drop mixed-array records whose array id the job does not keep
    fn select_array_ids(&self, records: Vec<Record>) -> Result<Vec<Record>> {
        if self.config.data_kind() == DataKind::Table {
            return Ok(records);
        }
        let Some(classify) = &self.config.classify else {
            return Ok(records);
        };
        if classify.array_ids.is_empty() {
            return Ok(records);
        }

        let column = self.discriminator()?;
        let kept = filter_array_ids(&records, &column, &classify.array_ids)?;
        debug!(
            "Kept {} of {} records with array ids {:?}",
            kept.len(),
            records.len(),
            classify.array_ids
        );
        Ok(kept)
    }

    fn discriminator(&self) -> Result<FieldKey> {
        self.config
            .array_id_column()
            .ok_or_else(|| Error::configuration("Mixed-array jobs need a discriminator column"))
    }

    /// Resolve the time columns and convert the zone, when configured
    fn resolve_time(&self, records: Vec<Record>) -> Result<Vec<Record>> {
        let Some(resolver) = &self.resolver else {
            return Ok(records);
        };

        let resolved = resolver.resolve(&records)?;
        debug!(
            "Resolved {} timestamps into '{}' ({})",
            resolved.len(),
            resolver.result_column(),
            resolver.time_zone()
        );

        match &self.config.convert {
            Some(convert) => {
                debug!("Converting '{}' to {}", resolver.result_column(), convert.time_zone);
                convert_time_zone(&resolved, resolver.result_column(), &convert.time_zone)
            }
            None => Ok(resolved),
        }
    }

    /// One unnamed stream for tables, one stream per bucket for mixed arrays
    fn split_streams(
        &self,
        records: Vec<Record>,
        file_stats: &mut FileStats,
    ) -> Result<Vec<(Option<String>, Vec<Record>)>> {
        if self.config.data_kind() == DataKind::Table {
            return Ok(vec![(None, records)]);
        }

        let column = self.discriminator()?;
        let classify = self.config.classify.clone().unwrap_or_default();

        let buckets = classify_arrays(&records, &column, Some(&classify.names))?;
        debug!("Classified records into {} buckets", buckets.len());
        file_stats.buckets += buckets.len();

        Ok(buckets
            .into_iter()
            .map(|(name, records)| (Some(name), records))
            .collect())
    }

    /// Apply extraction and renaming for one stream
    fn prepare_stream(&self, bucket: Option<&str>, records: &[Record]) -> Result<Vec<Record>> {
        let Some(first) = records.first() else {
            return Ok(Vec::new());
        };

        let columns = self
            .config
            .extract
            .as_ref()
            .and_then(|extract| extract.columns_for(bucket));
        // Project columns, or only apply the window when none are listed
        let extracted = match (columns, &self.window) {
            (Some(columns), window) => extract_columns(records, columns, window.as_ref())?,
            (None, Some(window)) => {
                let all_columns: Vec<FieldKey> = first.keys().cloned().collect();
                extract_columns(records, &all_columns, Some(window))?
            }
            (None, None) => records.to_vec(),
        };

        let names = self
            .config
            .rename
            .as_ref()
            .and_then(|rename| rename.names_for(bucket));
        match names {
            Some(names) => rename_columns(&extracted, names),
            None => Ok(extracted),
        }
    }

    fn write_stream(&self, output: &Path, records: &[Record]) -> Result<()> {
        let export = &self.config.export;
        let appending_to_existing = export.mode == WriteMode::Append
            && std::fs::metadata(output).is_ok_and(|metadata| metadata.len() > 0);
        let options = ExportOptions {
            include_header: export.include_header && !appending_to_existing,
            ..export.options()
        };

        // Append to a non-empty file without repeating the header
        let mut writer = CsvFlatFileWriter::create(output, export.delimiter, export.mode)?;
        export_records(records, &mut writer, options)?;

        info!("Wrote {} records to {}", records.len(), output.display());
        Ok(())
    }
}
