//! CLI argument definitions for the KSI collision cleaner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ksi_model::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR};

#[derive(Parser)]
#[command(
    name = "ksi-clean",
    version,
    about = "Clean the Toronto KSI collision export",
    long_about = "Clean the Toronto Killed or Seriously Injured (KSI) collision export.\n\n\
                  Writes a person-level table with parsed dates, times and centroid\n\
                  coordinates, and a collision-level table with one row per collision.\n\
                  Running without a subcommand is the same as `clean` with defaults."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean the raw export and write both tables.
    Clean(CleanArgs),

    /// List the collision key columns and the columns the cleaner derives.
    Columns,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Raw KSI collision CSV.
    #[arg(long = "input", value_name = "PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Directory for the cleaned tables (created if missing).
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

impl Default for CleanArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["ksi-clean"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn clean_defaults_to_fixed_paths() {
        let cli = Cli::try_parse_from(["ksi-clean", "clean"]).unwrap();
        let Some(Command::Clean(args)) = cli.command else {
            panic!("expected clean subcommand");
        };
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn clean_accepts_overrides_and_global_flags() {
        let cli = Cli::try_parse_from([
            "ksi-clean",
            "clean",
            "--input",
            "in.csv",
            "--output-dir",
            "out",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Some(Command::Clean(args)) = cli.command else {
            panic!("expected clean subcommand");
        };
        assert_eq!(args.input, PathBuf::from("in.csv"));
        assert_eq!(args.output_dir, PathBuf::from("out"));
    }
}
