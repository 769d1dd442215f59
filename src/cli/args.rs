//! Command-line argument definitions for the datalogger parser
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the datalogger parser
///
/// Reads Campbell Scientific logger files, resolves their time columns into
/// zone-aware timestamps, splits mixed-array files by array id and writes the
/// results back out as delimited files.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "campbellsci-parser",
    version,
    about = "Parse and time-resolve Campbell Scientific datalogger files",
    long_about = "Reads CR10X mixed-array and CR1000 TOA5 datalogger files, combines their \
                  time columns into zone-aware timestamps, splits mixed-array files into one \
                  output per array type and writes the results as delimited files. Each run \
                  is described by a TOML job file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run a job: read, resolve, classify and export
    Run(RunArgs),
    /// Load and validate a job file without reading any data
    Check(JobArgs),
}

/// Job file selection shared by all subcommands
#[derive(Debug, Clone, Parser)]
pub struct JobArgs {
    /// Job configuration file
    ///
    /// Defaults to config.toml in the campbellsci-parser directory under the
    /// user configuration directory.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the run command
#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Override the job's input glob pattern
    #[arg(short = 'i', long = "input", value_name = "PATTERN")]
    pub input: Option<String>,

    /// Override the job's output directory
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Tracing level implied by `-v` and `-q`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Job file arguments of whichever subcommand was given
    pub fn job_args(&self) -> &JobArgs {
        match &self.command {
            Commands::Run(run) => &run.job,
            Commands::Check(job) => job,
        }
    }
}
