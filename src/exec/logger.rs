// src/exec/logger.rs

//! Forward a child's output into the `tracing` log.

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::backend::ProcessRunner;
use crate::exec::runner::ConsoleRunner;
use crate::types::ProcessRequest;

/// Target of the forwarded child lines, so a filter such as
/// `info,child_output=off` keeps lifecycle logs and drops the output.
pub const CHILD_OUTPUT_TARGET: &str = "child_output";

/// Runs a process and logs each stdout line at `info` and each stderr line
/// at `warn`, tagged with the program name.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger<R = ConsoleRunner> {
    runner: R,
}

impl<R: ProcessRunner> ConsoleLogger<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Stream `request` into the log and return its exit code.
    ///
    /// Cancellation behaves as in [`ProcessRunner::run_streamed`].
    pub async fn run_logged(
        &self,
        request: &ProcessRequest,
        cancel_rx: oneshot::Receiver<()>,
    ) -> Result<i32> {
        let program = request.program();

        let mut on_output_line = |line: &str| {
            info!(target: CHILD_OUTPUT_TARGET, program = %program, "stdout: {}", line);
        };
        let mut on_error_line = |line: &str| {
            warn!(target: CHILD_OUTPUT_TARGET, program = %program, "stderr: {}", line);
        };

        self.runner
            .run_streamed(request, &mut on_output_line, &mut on_error_line, cancel_rx)
            .await
    }
}
