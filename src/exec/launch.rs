// src/exec/launch.rs

//! Building and spawning the child process.

use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::debug;

use crate::config::{CancelBehaviour, ConfigFile};
use crate::errors::{LaunchFailure, Result, RunnerError};
use crate::types::ProcessRequest;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Spawn the child described by `request` with stdin closed and both output
/// streams piped.
///
/// Every failure here is a [`RunnerError::Launch`]; no process exists when
/// this returns an error.
pub(crate) fn spawn_child(request: &ProcessRequest, config: &ConfigFile) -> Result<Child> {
    let program = request.program();

    if request.executable.as_os_str().is_empty() {
        return Err(launch_error(&program, LaunchFailure::NotFound));
    }

    let working_dir = request.working_dir.as_ref().or(config.working_dir());

    let mut cmd = Command::new(&request.executable);
    cmd.args(&request.arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(config.on_cancel() == CancelBehaviour::Kill);

    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    if let Some(dir) = working_dir {
        // Checked up front: on Unix a bad cwd surfaces from spawn as NotFound,
        // which would be indistinguishable from a missing executable.
        if !dir.is_dir() {
            return Err(launch_error(
                &program,
                LaunchFailure::InvalidWorkingDirectory(dir.clone()),
            ));
        }
        cmd.current_dir(dir);
    }

    debug!(
        program = %program,
        args = ?request.arguments,
        cwd = ?working_dir,
        "spawning child process"
    );

    cmd.spawn()
        .map_err(|e| launch_error(&program, LaunchFailure::from_spawn_error(e)))
}

fn launch_error(program: &str, reason: LaunchFailure) -> RunnerError {
    RunnerError::Launch {
        program: program.to_string(),
        reason,
    }
}

/// Exit code of a finished child.
///
/// On Unix a child killed by a signal reports `128 + signal`, matching shell
/// conventions. Anything else without a code reports `-1`.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
