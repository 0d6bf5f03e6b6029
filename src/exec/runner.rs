// src/exec/runner.rs

//! Production `ProcessRunner` on top of `tokio::process`.

use std::io;

use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::{CancelBehaviour, ConfigFile};
use crate::errors::{Result, RunnerError};
use crate::exec::backend::{LineCallback, ProcessRunner, RunFuture};
use crate::exec::launch::{exit_code, spawn_child};
use crate::exec::streams::{LineReader, drain_to_string};
use crate::types::{ProcessOutput, ProcessRequest};

/// Runs real child processes.
///
/// Holds no per-call state, so one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ConsoleRunner {
    config: ConfigFile,
}

impl ConsoleRunner {
    pub fn new(config: ConfigFile) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    async fn captured(&self, request: &ProcessRequest) -> Result<ProcessOutput> {
        let program = request.program();
        let mut child = spawn_child(request, &self.config)?;
        debug!(program = %program, pid = ?child.id(), "process started");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes while waiting; the call only completes once the
        // child has exited and both pipes hit EOF.
        let (stdout, stderr, status) = tokio::try_join!(
            drain_to_string(stdout),
            drain_to_string(stderr),
            child.wait(),
        )
        .map_err(|source| io_error(&program, source))?;

        let code = exit_code(status);
        info!(
            program = %program,
            exit_code = code,
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "process exited"
        );

        Ok(ProcessOutput::new(stdout, stderr, code))
    }

    async fn streamed(
        &self,
        request: &ProcessRequest,
        on_output_line: LineCallback<'_>,
        on_error_line: LineCallback<'_>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> Result<i32> {
        let program = request.program();

        // Spawn first; readers are only attached to a running child.
        let mut child = spawn_child(request, &self.config)?;
        debug!(program = %program, pid = ?child.id(), "process started; streaming output");

        let mut stdout = LineReader::new(child.stdout.take());
        let mut stderr = LineReader::new(child.stderr.take());

        let cancelled = cancellation(cancel_rx);
        tokio::pin!(cancelled);

        let mut status = None;

        let status = loop {
            let stdout_open = stdout.is_open();
            let stderr_open = stderr.is_open();

            if let Some(status) = status {
                if !stdout_open && !stderr_open {
                    break status;
                }
            }

            tokio::select! {
                line = stdout.next_line(), if stdout_open => {
                    if let Some(line) = line.map_err(|e| io_error(&program, e))? {
                        on_output_line(&line);
                    }
                }
                line = stderr.next_line(), if stderr_open => {
                    if let Some(line) = line.map_err(|e| io_error(&program, e))? {
                        on_error_line(&line);
                    }
                }
                res = child.wait(), if status.is_none() => {
                    status = Some(res.map_err(|e| io_error(&program, e))?);
                }
                () = &mut cancelled => {
                    let exited = status.is_some();
                    return Err(self.abandon(child, exited, stdout, stderr, &program).await);
                }
            }
        };

        let code = exit_code(status);
        info!(program = %program, exit_code = code, "process exited");

        Ok(code)
    }

    /// Stop waiting on a cancelled child, applying the configured
    /// [`CancelBehaviour`].
    ///
    /// `exited` is true when `child.wait()` already returned and only the
    /// pipes were still open.
    async fn abandon(
        &self,
        mut child: Child,
        exited: bool,
        stdout: LineReader<ChildStdout>,
        stderr: LineReader<ChildStderr>,
        program: &str,
    ) -> RunnerError {
        match self.config.on_cancel() {
            CancelBehaviour::Kill if exited => {
                debug!(program = %program, "wait cancelled; child process already exited");
            }
            CancelBehaviour::Kill => {
                info!(program = %program, "wait cancelled; killing child process");
                if let Err(e) = child.kill().await {
                    warn!(
                        program = %program,
                        error = %e,
                        "failed to kill child process on cancellation"
                    );
                }
            }
            CancelBehaviour::Detach => {
                info!(
                    program = %program,
                    pid = ?child.id(),
                    "wait cancelled; child process left running"
                );
                // Keep reading so a child that is still writing doesn't hit a
                // closed pipe. The readers end at EOF, when the child (and
                // anything it handed the pipes to) is gone.
                tokio::spawn(stdout.discard_to_eof());
                tokio::spawn(stderr.discard_to_eof());
            }
        }

        RunnerError::Cancelled {
            program: program.to_string(),
        }
    }
}

impl ProcessRunner for ConsoleRunner {
    fn run_captured<'a>(&'a self, request: &'a ProcessRequest) -> RunFuture<'a, ProcessOutput> {
        Box::pin(self.captured(request))
    }

    fn run_streamed<'a>(
        &'a self,
        request: &'a ProcessRequest,
        on_output_line: LineCallback<'a>,
        on_error_line: LineCallback<'a>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> RunFuture<'a, i32> {
        Box::pin(self.streamed(request, on_output_line, on_error_line, cancel_rx))
    }
}

/// Resolves when the caller asks for cancellation. A dropped sender never
/// resolves.
async fn cancellation(cancel_rx: oneshot::Receiver<()>) {
    if cancel_rx.await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn io_error(program: &str, source: io::Error) -> RunnerError {
    RunnerError::Io {
        program: program.to_string(),
        source,
    }
}
