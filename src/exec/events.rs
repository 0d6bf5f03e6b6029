// src/exec/events.rs

//! Line events as a channel instead of callbacks.

use tokio::sync::{mpsc, oneshot};

use crate::errors::Result;
use crate::exec::backend::ProcessRunner;
use crate::types::{OutputChannel, OutputLine, ProcessRequest};

/// Stream `request` through `runner`, sending every line to `tx` as an
/// [`OutputLine`], and return the exit code.
///
/// Lines sent after the receiver is dropped are discarded.
pub async fn stream_to_channel<R>(
    runner: &R,
    request: &ProcessRequest,
    tx: mpsc::UnboundedSender<OutputLine>,
    cancel_rx: oneshot::Receiver<()>,
) -> Result<i32>
where
    R: ProcessRunner + ?Sized,
{
    let stdout_tx = tx.clone();
    let mut on_output_line = move |line: &str| {
        let _ = stdout_tx.send(OutputLine {
            channel: OutputChannel::Stdout,
            text: line.to_string(),
        });
    };
    let mut on_error_line = move |line: &str| {
        let _ = tx.send(OutputLine {
            channel: OutputChannel::Stderr,
            text: line.to_string(),
        });
    };

    runner
        .run_streamed(request, &mut on_output_line, &mut on_error_line, cancel_rx)
        .await
}
