//! Built-in templates embedded at compile time.
//!
//! The stock template set is compiled into the binary from `templates/`.
//! A `registry.yml` manifest describes the entries; template payloads are
//! materialized into `~/.plinth/builtin/<dir>` when a create operation
//! needs a concrete filesystem path. Listing never touches the disk.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::error::{PlinthError, Result};
use crate::registry::entry::{TemplateEntry, TemplateLocation};

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// The built-in registry manifest (`templates/registry.yml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinManifest {
    /// Manifest format version.
    pub version: u32,
    /// Declared stock templates, in declaration order.
    pub templates: Vec<BuiltinTemplate>,
}

/// One stock template declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuiltinTemplate {
    /// Lookup name.
    pub name: String,
    /// Payload directory under `templates/`.
    pub dir: String,
    /// Human-readable description.
    pub description: String,
    /// Alternate lookup names.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Position relative to other registered templates.
    #[serde(default = "default_load_order")]
    pub load_order: u32,
}

fn default_load_order() -> u32 {
    100
}

/// Load the built-in registry manifest.
pub fn load_manifest() -> Result<BuiltinManifest> {
    let manifest_file = TEMPLATES_DIR.get_file("registry.yml").ok_or_else(|| {
        PlinthError::ConfigParseError {
            path: "templates/registry.yml".into(),
            message: "missing from embedded templates".to_string(),
        }
    })?;

    let content =
        manifest_file
            .contents_utf8()
            .ok_or_else(|| PlinthError::ConfigParseError {
                path: "templates/registry.yml".into(),
                message: "Invalid UTF-8".to_string(),
            })?;

    serde_yaml::from_str(content).map_err(|e| PlinthError::ConfigParseError {
        path: "templates/registry.yml".into(),
        message: e.to_string(),
    })
}

/// Registry entries for the stock templates, in declaration order.
pub fn entries() -> Result<Vec<TemplateEntry>> {
    Ok(load_manifest()?
        .templates
        .into_iter()
        .map(|t| TemplateEntry {
            name: t.name,
            description: t.description,
            aliases: t.aliases,
            load_order: t.load_order,
            location: TemplateLocation::Embedded(t.dir),
        })
        .collect())
}

/// Materialize an embedded template into the per-user builtin directory,
/// returning its path.
pub fn materialize(dir_name: &str) -> Result<PathBuf> {
    let target = crate::config::builtin_dir().join(dir_name);
    materialize_into(dir_name, &target)?;
    Ok(target)
}

/// Extract an embedded template directory to `target`, replacing any
/// previous extraction so the payload always matches this binary.
pub fn materialize_into(dir_name: &str, target: &Path) -> Result<()> {
    let dir = TEMPLATES_DIR
        .get_dir(dir_name)
        .ok_or_else(|| PlinthError::ConfigParseError {
            path: PathBuf::from("templates").join(dir_name),
            message: "not an embedded template directory".to_string(),
        })?;

    fs::create_dir_all(target)?;
    extract_dir(dir, Path::new(dir_name), target)?;
    Ok(())
}

fn extract_dir(dir: &Dir<'_>, prefix: &Path, target_root: &Path) -> std::io::Result<()> {
    for file in dir.files() {
        let rel = file.path().strip_prefix(prefix).unwrap_or(file.path());
        let dest = target_root.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, file.contents())?;
    }

    for sub in dir.dirs() {
        let rel = sub.path().strip_prefix(prefix).unwrap_or(sub.path());
        fs::create_dir_all(target_root.join(rel))?;
        extract_dir(sub, prefix, target_root)?;
    }

    Ok(())
}
