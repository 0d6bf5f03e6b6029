// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunnerError};

/// Load a configuration file and return the raw, unvalidated model.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        RunnerError::ConfigError(format!("reading config file {:?}: {}", path, e))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration the binary should use.
///
/// - An explicit path must exist.
/// - Without one, [`default_config_path`] is used if present, otherwise the
///   built-in defaults apply.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        debug!(path = ?default_path, "loading default config file");
        load_and_validate(default_path)
    } else {
        debug!("no config file found; using defaults");
        Ok(ConfigFile::default())
    }
}

/// `ConsoleRunner.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("ConsoleRunner.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::CancelBehaviour;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let cfg = load_and_validate(file.path()).unwrap();
        assert_eq!(cfg.on_cancel(), CancelBehaviour::Detach);
        assert!(cfg.working_dir().is_none());
    }

    #[test]
    fn reads_runner_section() {
        let file = write_config(
            r#"
[runner]
on_cancel = "kill"
working_dir = "build/out"
"#,
        );
        let cfg = load_and_validate(file.path()).unwrap();
        assert_eq!(cfg.on_cancel(), CancelBehaviour::Kill);
        assert_eq!(cfg.working_dir(), Some(&PathBuf::from("build/out")));
    }

    #[test]
    fn unknown_on_cancel_is_a_toml_error() {
        let file = write_config("[runner]\non_cancel = \"explode\"\n");
        match load_and_validate(file.path()) {
            Err(RunnerError::TomlError(_)) => {}
            other => panic!("expected TomlError, got {other:?}"),
        }
    }

    #[test]
    fn empty_working_dir_is_rejected() {
        let file = write_config("[runner]\nworking_dir = \"\"\n");
        match load_and_validate(file.path()) {
            Err(RunnerError::ConfigError(msg)) => assert!(msg.contains("working_dir")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            resolve_config(Some(missing.as_path())),
            Err(RunnerError::ConfigError(_))
        ));
    }

    #[test]
    fn cancel_behaviour_parses_case_insensitively() {
        assert_eq!(" KILL ".parse::<CancelBehaviour>(), Ok(CancelBehaviour::Kill));
        assert_eq!("detach".parse::<CancelBehaviour>(), Ok(CancelBehaviour::Detach));
        assert!("stop".parse::<CancelBehaviour>().is_err());
    }
}
