// src/types.rs

//! Plain data passed into and out of the runner.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::exec::args::split_argument_line;

/// Everything needed to start one child process.
///
/// `working_dir = None` means the child inherits the current working
/// directory. An empty path passed to [`ProcessRequest::working_dir`] is
/// treated the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub executable: PathBuf,
    pub arguments: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessRequest {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            arguments: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append arguments given as one command-line string, e.g.
    /// `-c "echo hello" --verbose`.
    ///
    /// See [`split_argument_line`] for the quoting rules.
    pub fn with_argument_line(mut self, line: &str) -> Self {
        self.arguments.extend(split_argument_line(line));
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.working_dir = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir.to_path_buf())
        };
        self
    }

    /// Display name of the executable, used in logs and errors.
    pub fn program(&self) -> String {
        self.executable.display().to_string()
    }
}

/// Result of one completed execution. Text is kept exactly as produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    stdout: String,
    stderr: String,
    exit_code: i32,
}

impl ProcessOutput {
    pub fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Trimmed stdout, or `None` when it is empty or only whitespace.
    pub fn trimmed_stdout(&self) -> Option<String> {
        let trimmed = self.stdout.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Which stream of the child a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputChannel::Stdout => f.write_str("stdout"),
            OutputChannel::Stderr => f.write_str("stderr"),
        }
    }
}

/// A single line received from a running child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub channel: OutputChannel,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trimmed_stdout_strips_surrounding_whitespace() {
        let out = ProcessOutput::new("  v1.2.3\n".into(), String::new(), 0);
        assert_eq!(out.trimmed_stdout().as_deref(), Some("v1.2.3"));
        assert_eq!(out.stdout(), "  v1.2.3\n");
    }

    #[test]
    fn trimmed_stdout_is_none_for_blank_output() {
        let empty = ProcessOutput::new(String::new(), "oops".into(), 2);
        assert_eq!(empty.trimmed_stdout(), None);

        let blank = ProcessOutput::new(" \n\t\r\n".into(), String::new(), 0);
        assert_eq!(blank.trimmed_stdout(), None);
    }

    #[test]
    fn empty_working_dir_means_inherit() {
        let req = ProcessRequest::new("ls").working_dir("");
        assert_eq!(req.working_dir, None);

        let req = ProcessRequest::new("ls").working_dir("/tmp");
        assert_eq!(req.working_dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn argument_line_is_appended_after_explicit_args() {
        let req = ProcessRequest::new("git")
            .arg("-C")
            .arg("repo")
            .with_argument_line(r#"commit -m "first commit""#);

        assert_eq!(
            req.arguments,
            vec!["-C", "repo", "commit", "-m", "first commit"]
        );
    }
}
