//! Template descriptor types.

use std::path::PathBuf;

use crate::error::Result;

/// Where a template's payload lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocation {
    /// Template directory on disk.
    Dir(PathBuf),
    /// Template embedded in the binary, named by its directory in the
    /// stock set; materialized to disk when a path is needed.
    Embedded(String),
}

/// One registry entry: a named, described template source.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// Lookup name (unique within the registry).
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Alternate lookup names.
    pub aliases: Vec<String>,
    /// Position relative to other entries (lower loads first).
    pub load_order: u32,
    /// Payload location.
    pub location: TemplateLocation,
}

impl TemplateEntry {
    /// Clone this entry under an alias name.
    pub fn aliased(&self, alias: &str) -> Self {
        Self {
            name: alias.to_string(),
            ..self.clone()
        }
    }

    /// Filesystem path of the template payload, materializing embedded
    /// templates on first use.
    pub fn path(&self) -> Result<PathBuf> {
        match &self.location {
            TemplateLocation::Dir(path) => Ok(path.clone()),
            TemplateLocation::Embedded(dir) => super::builtin::materialize(dir),
        }
    }
}
