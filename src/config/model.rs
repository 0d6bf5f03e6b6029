// src/config/model.rs

use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// What happens to a child when the caller cancels a streamed wait.
///
/// - `Detach` (default): stop waiting and leave the child alone. It may keep
///   running after the call returns.
/// - `Kill`: kill the child and reap it before returning `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelBehaviour {
    Detach,
    Kill,
}

impl Default for CancelBehaviour {
    fn default() -> Self {
        CancelBehaviour::Detach
    }
}

impl FromStr for CancelBehaviour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detach" => Ok(CancelBehaviour::Detach),
            "kill" => Ok(CancelBehaviour::Kill),
            other => Err(format!(
                "invalid on_cancel: {other} (expected \"detach\" or \"kill\")"
            )),
        }
    }
}

/// Configuration file as read from TOML, before validation.
///
/// ```toml
/// [runner]
/// on_cancel = "kill"
/// working_dir = "build"
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunnerSection {
    #[serde(default)]
    pub on_cancel: CancelBehaviour,

    /// Working directory for requests that don't carry their own.
    ///
    /// Omit the key to inherit the current directory.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    runner: RunnerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(runner: RunnerSection) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &RunnerSection {
        &self.runner
    }

    pub fn on_cancel(&self) -> CancelBehaviour {
        self.runner.on_cancel
    }

    pub fn working_dir(&self) -> Option<&PathBuf> {
        self.runner.working_dir.as_ref()
    }
}
