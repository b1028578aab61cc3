//! Tera-based production engine.
//!
//! Renders a template directory into the output directory: every path and
//! every UTF-8 file body goes through Tera with the assembled context;
//! non-UTF-8 files are copied verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::ui::UserInterface;

use super::context;
use super::git::GitFetcher;
use super::manifest::{TemplateManifest, MANIFEST_FILE};
use super::{has_url_scheme, Engine, EngineConfig, EngineError, GenerateRequest};

/// The shipped [`Engine`] implementation.
#[derive(Debug, Clone, Default)]
pub struct TeraEngine;

impl TeraEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl Engine for TeraEngine {
    fn generate(
        &self,
        request: &GenerateRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<PathBuf, EngineError> {
        let config = EngineConfig::load(request.config_file.as_deref())?;
        let clones = config
            .clones_dir
            .clone()
            .unwrap_or_else(crate::config::clones_dir);

        let (template_dir, template_key) = resolve_source(
            &request.source,
            request.options.checkout.as_deref(),
            &clones,
        )?;
        tracing::debug!(template = %template_dir.display(), "resolved template source");

        let manifest = TemplateManifest::load(&template_dir)?;
        let ctx = context::assemble(&manifest, &config, &request.options, &template_key, ui)?;

        let output_dir = request
            .options
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let created = render_tree(&template_dir, &output_dir, &ctx, request.overwrite)?;

        tracing::info!(output = %created.display(), "generation finished");
        Ok(created)
    }
}

/// Resolve a source string to a template directory and replay key.
///
/// URL sources clone into the cache under their repository name. Scheme-less
/// sources resolve as directories, falling back to the clone cache for
/// relative paths that do not exist locally. That fallback is what lets a
/// failed URL source be retried as `<repo-name>/<subdir>`.
fn resolve_source(
    source: &str,
    checkout: Option<&str>,
    clones_dir: &Path,
) -> Result<(PathBuf, String), EngineError> {
    if has_url_scheme(source) {
        let fetcher = GitFetcher::new(clones_dir);
        let repo_path = fetcher
            .fetch(source, checkout)
            .map_err(|e| EngineError::Fetch {
                url: source.to_string(),
                message: e.to_string(),
            })?;
        ensure_template_dir(source, &repo_path)?;
        return Ok((repo_path, GitFetcher::repo_name(source)));
    }

    let path = Path::new(source);
    let dir = if path.is_absolute() || path.exists() {
        path.to_path_buf()
    } else {
        clones_dir.join(path)
    };
    ensure_template_dir(source, &dir)?;

    let key = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "template".to_string());
    Ok((dir, key))
}

/// Require a manifest at the resolved directory.
///
/// The failure trace is multi-line and ends with the repository directory;
/// callers recover the repository name from that last line.
fn ensure_template_dir(source: &str, dir: &Path) -> Result<(), EngineError> {
    if dir.join(MANIFEST_FILE).is_file() {
        return Ok(());
    }
    Err(EngineError::RepositoryNotFound {
        trace: format!(
            "A template for '{}' was not found at:\n{}",
            source,
            dir.display()
        ),
    })
}

/// Render the template tree into the output directory, returning the first
/// top-level path created.
fn render_tree(
    template_dir: &Path,
    output_dir: &Path,
    ctx: &tera::Context,
    overwrite: bool,
) -> Result<PathBuf, EngineError> {
    fs::create_dir_all(output_dir)?;

    let mut first_created: Option<PathBuf> = None;

    for entry in sorted_entries(template_dir)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == MANIFEST_FILE {
            continue;
        }

        let Some(rendered) = render_name(&name, ctx)? else {
            continue;
        };

        let dest = output_dir.join(&rendered);
        if dest.exists() && !overwrite {
            return Err(EngineError::OutputExists { path: dest });
        }

        render_entry(&entry.path(), &dest, ctx)?;
        first_created.get_or_insert(dest);
    }

    Ok(first_created.unwrap_or_else(|| output_dir.to_path_buf()))
}

fn render_entry(src: &Path, dest: &Path, ctx: &tera::Context) -> Result<(), EngineError> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in sorted_entries(src)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(rendered) = render_name(&name, ctx)? else {
                continue;
            };
            render_entry(&entry.path(), &dest.join(rendered), ctx)?;
        }
        return Ok(());
    }

    let bytes = fs::read(src)?;
    match String::from_utf8(bytes) {
        Ok(text) => {
            let rendered = Tera::one_off(&text, ctx, false).map_err(|e| EngineError::Render {
                path: src.display().to_string(),
                message: e.to_string(),
            })?;
            fs::write(dest, rendered)?;
        }
        // Binary payloads are copied verbatim.
        Err(e) => fs::write(dest, e.into_bytes())?,
    }

    Ok(())
}

/// Render a file or directory name; `None` when it renders to nothing.
fn render_name(name: &str, ctx: &tera::Context) -> Result<Option<String>, EngineError> {
    let rendered = Tera::one_off(name, ctx, false).map_err(|e| EngineError::Render {
        path: name.to_string(),
        message: e.to_string(),
    })?;

    let rendered = rendered.trim().to_string();
    if rendered.is_empty() {
        Ok(None)
    } else {
        Ok(Some(rendered))
    }
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}
