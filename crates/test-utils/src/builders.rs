#![allow(dead_code)]

use std::path::Path;

use console_runner::config::{CancelBehaviour, ConfigFile, RawConfigFile};

/// Builder for a validated `ConfigFile`.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn on_cancel(mut self, behaviour: CancelBehaviour) -> Self {
        self.config.runner.on_cancel = behaviour;
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.runner.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
