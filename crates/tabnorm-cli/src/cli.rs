//! CLI argument definitions.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use tabnorm_cli::logging::{LogConfig, LogFormat};
use tabnorm_normalization::OverflowPolicy;

#[derive(Parser)]
#[command(
    name = "tabnorm",
    version,
    about = "Normalize dates, booleans, and versions in CSV files",
    long_about = "Normalize a CSV file column by column.\n\n\
                  Dates become YYYY-MM-DD, boolean tokens become true/false, empty\n\
                  versions become V1, and every cell is trimmed. Rows are padded or\n\
                  cut to the header width."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
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

    /// Include cell values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

impl Cli {
    /// Logging setup for these flags.
    ///
    /// `--log-level` beats `-v`/`-q`, which beat `RUST_LOG`. Colors follow
    /// `--color`; on auto they are used only when logging to a terminal.
    pub fn log_config(&self) -> LogConfig {
        let explicit_level = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit_level.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit_level.is_none() && !self.verbosity.is_present(),
            with_ansi,
            ..LogConfig::default()
        }
        .with_format(self.log_format.into())
        .with_log_file(self.log_file.clone())
        .with_log_data(self.log_data)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize a CSV file.
    Run(RunArgs),

    /// Show the effective column policy table.
    Columns(ColumnsArgs),
}

/// Where the column policy comes from.
#[derive(Args, Clone)]
pub struct PolicyArgs {
    /// TOML file with a [columns] table mapping column names to normalizers.
    #[arg(long = "policy", value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Start from an empty table instead of the built-in column rules.
    #[arg(long = "no-default-policy")]
    pub no_default_policy: bool,
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV file to normalize.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>_normalized.csv beside the input).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// How to handle rows with more fields than the header.
    #[arg(long = "overflow", value_enum, default_value = "truncate")]
    pub overflow: OverflowArg,

    /// Process the input and print the summary without writing a file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// CLI overflow choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum OverflowArg {
    /// Drop the excess fields.
    Truncate,
    /// Join the excess fields into the last column.
    Merge,
    /// Fail the run.
    Reject,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Truncate => OverflowPolicy::Truncate,
            OverflowArg::Merge => OverflowPolicy::MergeIntoLast,
            OverflowArg::Reject => OverflowPolicy::Reject,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "tabnorm",
            "run",
            "data.csv",
            "--overflow",
            "merge",
            "--policy",
            "rules.toml",
            "--dry-run",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.input, PathBuf::from("data.csv"));
        assert!(args.dry_run);
        assert_eq!(args.policy.policy, Some(PathBuf::from("rules.toml")));
        assert_eq!(
            OverflowPolicy::from(args.overflow),
            OverflowPolicy::MergeIntoLast
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tabnorm", "columns", "--log-data", "--log-format", "json"]);
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }

    #[test]
    fn test_default_log_config_defers_to_env() {
        let config = Cli::parse_from(["tabnorm", "columns"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.log_data);
    }

    #[test]
    fn test_explicit_level_beats_verbosity() {
        let cli = Cli::parse_from(["tabnorm", "-vv", "--log-level", "error", "columns"]);
        let config = cli.log_config();
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);

        let config = Cli::parse_from(["tabnorm", "-v", "columns"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn test_log_file_disables_auto_color() {
        let cli = Cli::parse_from(["tabnorm", "--log-file", "run.log", "--log-data", "columns"]);
        let config = cli.log_config();
        assert!(!config.with_ansi);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
        assert!(config.log_data);
    }
}
