use std::sync::{Arc, Mutex};

use console_runner::errors::{LaunchFailure, RunnerError};
use console_runner::exec::{LineCallback, ProcessRunner, RunFuture};
use console_runner::types::{OutputChannel, OutputLine, ProcessOutput, ProcessRequest};
use tokio::sync::oneshot;

/// A scripted runner that never spawns anything.
///
/// - records every request it receives,
/// - replays a fixed list of lines (streamed) or their concatenation
///   (captured),
/// - optionally fails to launch, or blocks until cancelled.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    lines: Vec<OutputLine>,
    exit_code: i32,
    fail_launch: bool,
    wait_for_cancel: bool,
    requests: Arc<Mutex<Vec<ProcessRequest>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout_line(mut self, text: &str) -> Self {
        self.lines.push(OutputLine {
            channel: OutputChannel::Stdout,
            text: text.to_string(),
        });
        self
    }

    pub fn stderr_line(mut self, text: &str) -> Self {
        self.lines.push(OutputLine {
            channel: OutputChannel::Stderr,
            text: text.to_string(),
        });
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    pub fn fail_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// After replaying its lines, a streamed run waits until cancelled.
    pub fn wait_for_cancel(mut self) -> Self {
        self.wait_for_cancel = true;
        self
    }

    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &ProcessRequest) -> Result<(), RunnerError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_launch {
            return Err(RunnerError::Launch {
                program: request.program(),
                reason: LaunchFailure::NotFound,
            });
        }
        Ok(())
    }

    fn joined(&self, channel: OutputChannel) -> String {
        self.lines
            .iter()
            .filter(|l| l.channel == channel)
            .map(|l| format!("{}\n", l.text))
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run_captured<'a>(&'a self, request: &'a ProcessRequest) -> RunFuture<'a, ProcessOutput> {
        Box::pin(async move {
            self.record(request)?;
            Ok(ProcessOutput::new(
                self.joined(OutputChannel::Stdout),
                self.joined(OutputChannel::Stderr),
                self.exit_code,
            ))
        })
    }

    fn run_streamed<'a>(
        &'a self,
        request: &'a ProcessRequest,
        on_output_line: LineCallback<'a>,
        on_error_line: LineCallback<'a>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> RunFuture<'a, i32> {
        Box::pin(async move {
            self.record(request)?;

            for line in &self.lines {
                match line.channel {
                    OutputChannel::Stdout => on_output_line(&line.text),
                    OutputChannel::Stderr => on_error_line(&line.text),
                }
            }

            if self.wait_for_cancel {
                if cancel_rx.await.is_ok() {
                    return Err(RunnerError::Cancelled {
                        program: request.program(),
                    });
                }
                std::future::pending::<()>().await;
            }

            Ok(self.exit_code)
        })
    }
}
