// src/config/mod.rs

//! Runner configuration.
//!
//! - TOML-backed data model (`model.rs`).
//! - Loading from disk (`loader.rs`).
//! - Validation of invariants serde can't express (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{CancelBehaviour, ConfigFile, RawConfigFile, RunnerSection};
pub use validate::validate_config;
