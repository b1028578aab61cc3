//! User configuration file and per-user directories.
//!
//! Everything Plinth keeps on disk lives under one directory: `~/.plinth`,
//! overridable with the `PLINTH_HOME` environment variable. The
//! configuration file inside it is read-only from Plinth's point of view.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde_yaml::Value;

use crate::error::{PlinthError, Result};

/// Name of the configuration section handed to the generation engine.
pub const GENERATOR_SECTION: &str = "generator";

/// The per-user Plinth directory.
///
/// `PLINTH_HOME` overrides the default `~/.plinth`.
pub fn plinth_home() -> PathBuf {
    if let Some(home) = env::var_os("PLINTH_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .map(|h| h.join(".plinth"))
        .unwrap_or_else(|| PathBuf::from(".plinth"))
}

/// Path of the user configuration file.
pub fn user_config_path() -> PathBuf {
    plinth_home().join("config.yml")
}

/// Directory for clones of URL template sources.
pub fn clones_dir() -> PathBuf {
    plinth_home().join("clones")
}

/// Directory for saved generation contexts (`--replay`).
pub fn replay_dir() -> PathBuf {
    plinth_home().join("replay")
}

/// Directory the built-in templates are materialized into.
pub fn builtin_dir() -> PathBuf {
    plinth_home().join("builtin")
}

/// Load the user configuration file, if present.
///
/// Returns `Ok(None)` when the file does not exist; a file that exists but
/// fails to parse is an error.
pub fn load_user_config() -> Result<Option<Value>> {
    let path = user_config_path();
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PlinthError::Io(e)),
    };

    let value =
        serde_yaml::from_str(&content).map_err(|e| PlinthError::ConfigParseError {
            path,
            message: e.to_string(),
        })?;

    Ok(Some(value))
}

/// Extract the generation-engine section from a parsed user configuration.
///
/// A missing or non-mapping section yields an empty mapping.
pub fn generator_section(config: &Value) -> Value {
    config
        .get(GENERATOR_SECTION)
        .cloned()
        .unwrap_or(Value::Mapping(Default::default()))
}
