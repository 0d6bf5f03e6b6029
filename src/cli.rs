// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `console-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "console-runner",
    version,
    about = "Run an executable and capture or stream its output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `ConsoleRunner.toml` in the current working directory, if it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Working directory for the child (overrides `[runner].working_dir`).
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// How to run the child and present its output.
    #[arg(long, value_enum, default_value_t = RunMode::Captured)]
    pub mode: RunMode,

    /// Extra arguments as a single string, split like a command line and
    /// appended after ARGS.
    #[arg(long, value_name = "STRING", allow_hyphen_values = true)]
    pub arg_line: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CONSOLE_RUNNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Executable to run.
    #[arg(value_name = "EXECUTABLE")]
    pub executable: PathBuf,

    /// Arguments passed to the executable.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Output handling mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Wait for exit, then print stdout and stderr verbatim.
    Captured,
    /// Wait for exit, then print the trimmed stdout (nothing if blank).
    Trimmed,
    /// Print lines as they arrive; Ctrl-C stops waiting.
    Streamed,
    /// Send lines to the log; Ctrl-C stops waiting.
    Logged,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
