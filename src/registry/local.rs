//! User-registered templates.
//!
//! Every directory under `~/.plinth/templates/` that carries a
//! `template.yml` manifest registers a template, named after the directory.
//! Registry metadata (aliases, load order) comes from the manifest's
//! `registry` section.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::TemplateManifest;
use crate::error::Result;
use crate::registry::entry::{TemplateEntry, TemplateLocation};

/// Directory the user registers templates in.
pub fn user_templates_dir() -> PathBuf {
    crate::config::plinth_home().join("templates")
}

/// Registry entries for user templates, sorted by directory name for
/// deterministic declaration order.
///
/// A missing templates directory yields no entries; a directory whose
/// manifest fails to parse is an error.
pub fn entries() -> Result<Vec<TemplateEntry>> {
    entries_in(&user_templates_dir())
}

fn entries_in(dir: &Path) -> Result<Vec<TemplateEntry>> {
    let mut out = Vec::new();

    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
        Err(e) => return Err(e.into()),
    };

    let mut paths: Vec<PathBuf> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        if !path.is_dir() || !TemplateManifest::path_in(&path).is_file() {
            continue;
        }

        let manifest = TemplateManifest::load(&path)?;
        let registry = manifest.registry.unwrap_or_default();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        out.push(TemplateEntry {
            name,
            description: manifest.description,
            aliases: registry.aliases,
            load_order: registry.load_order,
            location: TemplateLocation::Dir(path),
        });
    }

    Ok(out)
}
