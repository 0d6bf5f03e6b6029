// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunnerError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RunnerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.runner))
    }
}

/// Check semantic invariants that `serde` cannot express.
///
/// `on_cancel` is strongly typed and rejected during deserialization, so only
/// `working_dir` needs checking here.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(dir) = &cfg.runner.working_dir {
        if dir.as_os_str().is_empty() {
            return Err(RunnerError::ConfigError(
                "[runner].working_dir must not be empty; omit it to inherit the current directory"
                    .to_string(),
            ));
        }
    }
    Ok(())
}
