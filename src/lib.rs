// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::io::Write;

use anyhow::Result;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::cli::{CliArgs, RunMode};
use crate::config::resolve_config;
use crate::exec::{ConsoleLogger, ConsoleRunner, ProcessRunner};
use crate::types::ProcessRequest;

/// Exit code reported when a streamed run is cancelled with Ctrl-C.
pub const EXIT_CANCELLED: i32 = 130;

/// High-level entry point used by `main.rs`.
///
/// Loads config, builds the request from the CLI, wires Ctrl-C to
/// cancellation for the streaming modes and returns the exit code the binary
/// should exit with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config = resolve_config(args.config.as_deref())?;
    let runner = ConsoleRunner::new(config);
    let request = build_request(&args);

    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

    // Ctrl-C → stop waiting (streamed / logged only).
    if matches!(args.mode, RunMode::Streamed | RunMode::Logged) {
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = cancel_tx.send(());
        });
    }

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    execute(
        &runner,
        args.mode,
        &request,
        cancel_rx,
        &mut stdout,
        &mut stderr,
    )
    .await
}

/// Turn CLI arguments into a [`ProcessRequest`].
pub fn build_request(args: &CliArgs) -> ProcessRequest {
    let mut request = ProcessRequest::new(&args.executable).args(args.args.iter().cloned());

    if let Some(line) = &args.arg_line {
        request = request.with_argument_line(line);
    }
    if let Some(dir) = &args.cwd {
        request = request.working_dir(dir);
    }

    request
}

/// Run `request` through `runner` in the given mode, writing the child's
/// output to `out` / `err`.
///
/// Returns the exit code to report:
/// - `captured` / `streamed` / `logged`: the child's exit code,
/// - `trimmed`: `0` if there was non-blank stdout, `1` otherwise,
/// - [`EXIT_CANCELLED`] when a streamed wait was cancelled.
pub async fn execute<R, O, E>(
    runner: &R,
    mode: RunMode,
    request: &ProcessRequest,
    cancel_rx: oneshot::Receiver<()>,
    out: &mut O,
    err: &mut E,
) -> Result<i32>
where
    R: ProcessRunner + ?Sized,
    O: Write + Send,
    E: Write + Send,
{
    debug!(program = %request.program(), ?mode, "executing");

    let result = match mode {
        RunMode::Captured => {
            let output = runner.run_captured(request).await?;
            out.write_all(output.stdout().as_bytes())?;
            err.write_all(output.stderr().as_bytes())?;
            Ok(output.exit_code())
        }
        RunMode::Trimmed => match runner.run_captured_trimmed_stdout(request).await? {
            Some(text) => {
                writeln!(out, "{text}")?;
                Ok(0)
            }
            None => Ok(1),
        },
        RunMode::Streamed => {
            let mut on_output_line = |line: &str| {
                let _ = writeln!(out, "{line}");
            };
            let mut on_error_line = |line: &str| {
                let _ = writeln!(err, "{line}");
            };
            runner
                .run_streamed(request, &mut on_output_line, &mut on_error_line, cancel_rx)
                .await
        }
        RunMode::Logged => {
            ConsoleLogger::new(runner)
                .run_logged(request, cancel_rx)
                .await
        }
    };

    out.flush()?;
    err.flush()?;

    match result {
        Ok(code) => Ok(code),
        Err(e) if e.is_cancelled() => {
            warn!(program = %request.program(), "cancelled; child may still be running");
            Ok(EXIT_CANCELLED)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    #[test]
    fn request_combines_args_arg_line_and_cwd() {
        let args = CliArgs::try_parse_from([
            "console-runner",
            "--cwd",
            "/tmp",
            "--arg-line",
            r#"-m "two words""#,
            "git",
            "commit",
        ])
        .unwrap();

        let request = build_request(&args);
        assert_eq!(request.executable, PathBuf::from("git"));
        assert_eq!(request.arguments, vec!["commit", "-m", "two words"]);
        assert_eq!(request.working_dir, Some(PathBuf::from("/tmp")));
    }
}
