// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `ProcessRunner` trait that callers depend on.
//! - [`runner`] is the `tokio::process` implementation, `ConsoleRunner`.
//! - `launch` builds and spawns the child and maps exit statuses.
//! - `streams` drains pipes and splits them into lines.
//! - [`events`] adapts streamed callbacks to an mpsc channel.
//! - [`logger`] forwards streamed output into `tracing`.
//! - [`args`] splits a one-string argument line.

pub mod args;
pub mod backend;
pub mod events;
mod launch;
pub mod logger;
pub mod runner;
mod streams;

pub use args::split_argument_line;
pub use backend::{LineCallback, ProcessRunner, RunFuture};
pub use events::stream_to_channel;
pub use logger::{CHILD_OUTPUT_TARGET, ConsoleLogger};
pub use runner::ConsoleRunner;
