// src/exec/backend.rs

//! The `ProcessRunner` abstraction.
//!
//! Application code talks to a `ProcessRunner` rather than to
//! `tokio::process` directly, so tests can swap in a scripted fake while
//! production uses [`ConsoleRunner`](super::ConsoleRunner).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::errors::Result;
use crate::types::{ProcessOutput, ProcessRequest};

/// Boxed future returned by every runner operation.
pub type RunFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Callback invoked once per received line, without the line terminator.
pub type LineCallback<'a> = &'a mut (dyn FnMut(&str) + Send + 'a);

/// Launch a child process and wait for it.
///
/// None of the operations treat a non-zero exit code as an error. They fail
/// only when the process cannot be launched, or (for
/// [`run_streamed`](ProcessRunner::run_streamed)) when the caller cancels.
pub trait ProcessRunner: Send + Sync {
    /// Run to completion, capturing stdout and stderr in memory.
    ///
    /// Both pipes are drained while waiting for exit, so a child that writes
    /// more than the OS pipe buffer can hold never stalls.
    fn run_captured<'a>(&'a self, request: &'a ProcessRequest) -> RunFuture<'a, ProcessOutput>;

    /// Run to completion and return the trimmed stdout, or `None` if it was
    /// empty or whitespace only. stderr and the exit code are discarded; use
    /// [`run_captured`](ProcessRunner::run_captured) when they matter.
    fn run_captured_trimmed_stdout<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> RunFuture<'a, Option<String>> {
        Box::pin(async move {
            let output = self.run_captured(request).await?;
            Ok(output.trimmed_stdout())
        })
    }

    /// Run the child, delivering each stdout/stderr line to the matching
    /// callback as it arrives, and return the exit code.
    ///
    /// Lines on one stream arrive in order; there is no ordering between the
    /// two streams.
    ///
    /// Sending on the sender half of `cancel_rx` abandons the wait and
    /// returns [`RunnerError::Cancelled`](crate::errors::RunnerError::Cancelled).
    /// Dropping the sender without sending never cancels. Whether the child
    /// survives cancellation depends on the runner's configuration; callers
    /// must assume it may still be running.
    fn run_streamed<'a>(
        &'a self,
        request: &'a ProcessRequest,
        on_output_line: LineCallback<'a>,
        on_error_line: LineCallback<'a>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> RunFuture<'a, i32>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run_captured<'a>(&'a self, request: &'a ProcessRequest) -> RunFuture<'a, ProcessOutput> {
        (**self).run_captured(request)
    }

    fn run_captured_trimmed_stdout<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> RunFuture<'a, Option<String>> {
        (**self).run_captured_trimmed_stdout(request)
    }

    fn run_streamed<'a>(
        &'a self,
        request: &'a ProcessRequest,
        on_output_line: LineCallback<'a>,
        on_error_line: LineCallback<'a>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> RunFuture<'a, i32> {
        (**self).run_streamed(request, on_output_line, on_error_line, cancel_rx)
    }
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for Arc<R> {
    fn run_captured<'a>(&'a self, request: &'a ProcessRequest) -> RunFuture<'a, ProcessOutput> {
        (**self).run_captured(request)
    }

    fn run_captured_trimmed_stdout<'a>(
        &'a self,
        request: &'a ProcessRequest,
    ) -> RunFuture<'a, Option<String>> {
        (**self).run_captured_trimmed_stdout(request)
    }

    fn run_streamed<'a>(
        &'a self,
        request: &'a ProcessRequest,
        on_output_line: LineCallback<'a>,
        on_error_line: LineCallback<'a>,
        cancel_rx: oneshot::Receiver<()>,
    ) -> RunFuture<'a, i32> {
        (**self).run_streamed(request, on_output_line, on_error_line, cancel_rx)
    }
}
