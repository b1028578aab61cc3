//! Template manifest schema.
//!
//! Every template directory carries a `template.yml` describing it: a
//! description, the ordered variables the engine will resolve, and (for
//! user-registered templates) an optional `registry` section with the
//! metadata the template registry needs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::EngineError;

/// Manifest file name expected at a template root.
pub const MANIFEST_FILE: &str = "template.yml";

/// A parsed `template.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateManifest {
    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Registry metadata for user-registered templates.
    #[serde(default)]
    pub registry: Option<RegistrySection>,

    /// Variables to resolve before rendering, in prompt order.
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
}

/// Registry metadata carried by a user template's manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySection {
    /// Alternate lookup names for the template.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Position relative to other registered templates (lower loads first).
    #[serde(default = "default_load_order")]
    pub load_order: u32,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            aliases: Vec::new(),
            load_order: default_load_order(),
        }
    }
}

/// User templates default ahead of the stock set, so a user template named
/// like a stock one shadows it.
fn default_load_order() -> u32 {
    50
}

/// One template variable.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateVariable {
    /// Context key.
    pub name: String,

    /// Question shown at the prompt (the name when absent).
    #[serde(default)]
    pub prompt: Option<String>,

    /// Default value. String defaults are themselves rendered against the
    /// partial context, so they may reference earlier variables.
    #[serde(default)]
    pub default: serde_yaml::Value,
}

impl TemplateManifest {
    /// Manifest path inside a template directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Load the manifest from a template directory.
    pub fn load(dir: &Path) -> Result<Self, EngineError> {
        let path = Self::path_in(dir);
        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| EngineError::Manifest {
            path,
            message: e.to_string(),
        })
    }
}
