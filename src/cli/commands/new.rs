//! New command implementation.
//!
//! `plinth new` either lists the registered templates (`--list`) or creates
//! an application structure from one. The template identifier may be a
//! registered name, a filesystem path, or a repository URL; names are
//! resolved through the registry, everything else goes to the engine
//! unchanged.
//!
//! A URL source whose repository root turns out not to be a template is
//! retried once as `<repo-name>/<path>` when a path into the template was
//! given; the repository name is recovered from the last line of the
//! engine's failure trace.

use std::io::Write;
use std::path::{Path, MAIN_SEPARATOR};

use tempfile::NamedTempFile;

use crate::cli::args::NewArgs;
use crate::config::{generator_section, load_user_config, prune_empty};
use crate::engine::{
    has_url_scheme, Engine, EngineError, GenerateOptions, GenerateRequest, TeraEngine,
};
use crate::error::{PlinthError, Result};
use crate::registry::Registry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The new command implementation.
pub struct NewCommand {
    args: NewArgs,
    engine: Box<dyn Engine>,
}

impl NewCommand {
    /// Create a new command backed by the shipped engine.
    pub fn new(args: NewArgs) -> Self {
        Self::with_engine(args, Box::new(TeraEngine::new()))
    }

    /// Create a new command with a specific engine (used by tests).
    pub fn with_engine(args: NewArgs, engine: Box<dyn Engine>) -> Self {
        Self { args, engine }
    }

    fn list(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = Registry::load()?;
        render_listing(registry, &self.args.template, ui);
        Ok(CommandResult::success())
    }

    fn create(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let args = &self.args;
        let rel_path = args.path.trim_start_matches(MAIN_SEPARATOR);
        let has_scheme = has_url_scheme(&args.template);

        let mut source = args.template.clone();
        if !has_scheme
            && !args.template.contains(MAIN_SEPARATOR)
            && !Path::new(&args.template).exists()
        {
            let registry = Registry::load()?;
            let Some(entry) = registry.get(&args.template) else {
                ui.message(&format!("Template '{}' not found", args.template));
                return Ok(CommandResult::failure(1));
            };

            let mut template_path = entry.path()?;
            if !rel_path.is_empty() {
                template_path = template_path.join(rel_path);
            }
            source = template_path.to_string_lossy().into_owned();
        }

        // The guard keeps the staged file alive across both engine calls
        // and deletes it on every exit path.
        let staged = stage_engine_config(load_user_config()?)?;
        let config_file = staged.as_ref().map(|file| file.path().to_path_buf());

        let request = GenerateRequest {
            source,
            overwrite: args.overwrite,
            config_file,
            options: GenerateOptions {
                no_input: args.no_input,
                checkout: args.checkout.clone(),
                replay: args.replay,
                output_dir: args.output_dir.clone(),
            },
        };

        let created = match self.engine.generate(&request, ui) {
            Ok(path) => path,
            Err(EngineError::RepositoryNotFound { trace })
                if has_scheme && !rel_path.is_empty() =>
            {
                let repo_dir = trace.lines().last().unwrap_or("");
                let repo_name = Path::new(repo_dir)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                let mut retry = request.clone();
                retry.source = Path::new(&repo_name)
                    .join(rel_path)
                    .to_string_lossy()
                    .into_owned();

                tracing::debug!(source = %retry.source, "retrying with repository-relative source");
                self.engine
                    .generate(&retry, ui)
                    .map_err(PlinthError::Engine)?
            }
            Err(e) => return Err(PlinthError::Engine(e)),
        };

        ui.success(&format!("Created {}", created.display()));
        Ok(CommandResult::success())
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.list {
            self.list(ui)
        } else {
            self.create(ui)
        }
    }
}

/// Render the template listing.
///
/// The `default` entry is set aside and always shown last, specially
/// labeled. A filter naming a registered template narrows the listing to
/// that entry.
fn render_listing(mut registry: Registry, filter: &str, ui: &mut dyn UserInterface) {
    if registry.is_empty() {
        ui.message("No registered templates");
        return;
    }

    let default = registry.remove("default");

    let mut rows: Vec<(String, String)> = registry
        .entries()
        .iter()
        .map(|entry| (entry.name.clone(), entry.description.clone()))
        .collect();
    rows.sort();

    if !filter.is_empty() && rows.iter().any(|(name, _)| name == filter) {
        rows.retain(|(name, _)| name == filter);
    }

    if !rows.is_empty() {
        let padding = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        ui.message("Available templates:");
        for (name, description) in &rows {
            ui.message(&format!(" - {:<width$}: {}", name, description, width = padding));
        }
    }

    if let Some(default) = default {
        ui.message("");
        ui.message(&format!(" * default: {}", default.description));
    }
}

/// Stage the pruned `generator` section of the user configuration as an
/// ephemeral file for the engine.
///
/// Returns `None` when there is no user configuration or the section
/// prunes to nothing; the engine then runs on built-in defaults only.
fn stage_engine_config(user_config: Option<serde_yaml::Value>) -> Result<Option<NamedTempFile>> {
    let Some(config) = user_config else {
        return Ok(None);
    };
    let Some(section) = prune_empty(&generator_section(&config)) else {
        return Ok(None);
    };

    let mut file = NamedTempFile::new()?;
    let content = serde_yaml::to_string(&section).map_err(anyhow::Error::from)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(Some(file))
}
