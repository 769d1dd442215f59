//! Command implementations for the datalogger parser CLI
//!
//! This module contains command dispatch, logging setup, job loading and the
//! run summary.

use crate::app::services::pipeline::{Pipeline, PipelineStats};
use crate::cli::args::{Args, Commands, JobArgs, RunArgs};
use crate::config::{JobConfig, default_config_path};
use crate::constants::LOG_TARGET;
use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    match &args.command {
        Commands::Run(run_args) => run_job(run_args),
        Commands::Check(job_args) => check_job(job_args),
    }
}

fn run_job(args: &RunArgs) -> Result<()> {
    let mut config = load_configuration(&args.job)?;
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.export.output_dir = output.clone();
    }

    let stats = Pipeline::run(&config).context("Job failed")?;
    print_summary(&config, &stats);
    Ok(())
}

fn check_job(args: &JobArgs) -> Result<()> {
    let config = load_configuration(args)?;
    let pipeline = Pipeline::new(&config).context("Job cannot be run")?;
    let files = pipeline.discover_files()?;

    println!("{}", "Job configuration is valid".bright_green().bold());
    println!("  {} {}", "Input:".bright_cyan(), config.input);
    println!("  {} {:?}", "Kind:".bright_cyan(), config.data_kind());
    if let Some(logger) = config.logger {
        println!("  {} {}", "Logger:".bright_cyan(), logger);
    }
    println!(
        "  {} {}",
        "Matching files:".bright_cyan(),
        files.len().to_string().bright_white().bold()
    );
    Ok(())
}

/// Set up tracing from `-v`/`-q`; `RUST_LOG` takes precedence
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load the job from `--config`, or from the default location if it exists
fn load_configuration(args: &JobArgs) -> Result<JobConfig> {
    let path = resolve_config_path(args)?;
    info!("Using job file: {}", path.display());

    JobConfig::load(&path)
        .with_context(|| format!("Failed to load job configuration from {}", path.display()))
}

fn resolve_config_path(args: &JobArgs) -> Result<PathBuf> {
    if let Some(path) = &args.config {
        return Ok(path.clone());
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(path),
        Some(path) => bail!(
            "No job file given and none found at {} (use --config)",
            path.display()
        ),
        None => bail!("No job file given and no user configuration directory (use --config)"),
    }
}

fn print_summary(config: &JobConfig, stats: &PipelineStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records read:".bright_cyan(),
        stats.records_read.to_string().bright_white()
    );
    println!(
        "  {} {} ({:.1}%)",
        "Records written:".bright_cyan(),
        stats.records_written.to_string().bright_white().bold(),
        stats.retention_rate()
    );
    if stats.buckets > 0 {
        println!(
            "  {} {}",
            "Array buckets:".bright_cyan(),
            stats.buckets.to_string().bright_white()
        );
    }
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        config.export.output_dir.display()
    );
    if stats.files_processed == 0 {
        println!(
            "  {} no files match {}",
            "Warning:".bright_yellow(),
            config.input
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_config_path_wins() {
        let args = JobArgs {
            config: Some(PathBuf::from("job.toml")),
        };
        assert_eq!(resolve_config_path(&args).unwrap(), PathBuf::from("job.toml"));
    }

    #[test]
    fn test_load_configuration_adds_context() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "input = \"\"").unwrap();
        let args = JobArgs {
            config: Some(file.path().to_path_buf()),
        };

        let error = load_configuration(&args).unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains("Failed to load job configuration"));
        assert!(message.contains("Input pattern must not be empty"));
    }
}
