//! The generation engine.
//!
//! The engine is the collaborator that turns a template source into files on
//! disk. Commands talk to it through the [`Engine`] trait so tests can
//! substitute recording or failing doubles; [`TeraEngine`] is the shipped
//! implementation.
//!
//! A source string is one of:
//! - a directory containing a `template.yml` manifest,
//! - a repository URL (anything with a scheme), cloned with git into the
//!   clone cache and expected to hold the manifest at its root,
//! - a relative path, resolved against the clone cache when it does not
//!   exist locally, so a caller can retry a failed URL source as
//!   `<repo-name>/<subdir>`.

pub mod context;
pub mod generator;
pub mod git;
pub mod manifest;

pub use generator::TeraEngine;
pub use manifest::{TemplateManifest, TemplateVariable, MANIFEST_FILE};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ui::UserInterface;

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Template source: directory, URL, or clone-cache-relative path.
    pub source: String,
    /// Overwrite existing output instead of aborting.
    pub overwrite: bool,
    /// Optional engine configuration file (staged by the caller).
    pub config_file: Option<PathBuf>,
    /// Remaining generation options, passed through unchanged.
    pub options: GenerateOptions,
}

/// Options forwarded to the engine unchanged.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Don't prompt for template variables; use default settings.
    pub no_input: bool,
    /// Branch, tag or commit ID to checkout after clone.
    pub checkout: Option<String>,
    /// Reuse the context saved by the previous run instead of prompting.
    pub replay: bool,
    /// Directory to generate into (current directory when absent).
    pub output_dir: Option<PathBuf>,
}

/// Engine configuration, deserialized from the ephemeral file the create
/// command stages. Absent file means built-in defaults only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Persisted variable defaults, overriding template-manifest defaults.
    #[serde(default)]
    pub default_context: serde_yaml::Mapping,

    /// Override for the clone cache directory.
    #[serde(default)]
    pub clones_dir: Option<PathBuf>,

    /// Override for the replay store directory.
    #[serde(default)]
    pub replay_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Load the configuration from an optional file.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Typed engine failures.
///
/// [`EngineError::RepositoryNotFound`] is the one callers inspect: its trace
/// is multi-line and the last line is the repository directory the engine
/// looked at.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No template was found at the resolved repository location.
    #[error("{trace}")]
    RepositoryNotFound { trace: String },

    /// Cloning or updating a URL source failed.
    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    /// The template manifest could not be parsed.
    #[error("Invalid template manifest at {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// The engine configuration file could not be parsed.
    #[error("Invalid engine configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Rendering a template file or path failed.
    #[error("Failed to render {path}: {message}")]
    Render { path: String, message: String },

    /// The rendering context could not be built.
    #[error("Failed to build template context: {message}")]
    Context { message: String },

    /// Prompting for a template variable failed.
    #[error("Prompt failed: {message}")]
    Input { message: String },

    /// `--replay` was given but no context was saved for the template.
    #[error("No replay context recorded for '{template}'")]
    ReplayMissing { template: String },

    /// The output already exists and overwrite was not requested.
    #[error("'{path}' already exists; pass --overwrite to replace it")]
    OutputExists { path: PathBuf },

    /// IO error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Trait for generation engines.
pub trait Engine {
    /// Generate from `request`, returning the path of the created output.
    fn generate(
        &self,
        request: &GenerateRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<PathBuf, EngineError>;
}

/// Whether a template identifier carries a URL scheme.
pub fn has_url_scheme(source: &str) -> bool {
    source.contains("://")
}
