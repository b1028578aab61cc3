//! Rendering-context assembly.
//!
//! The context handed to the renderer is layered, in increasing priority:
//! template-manifest defaults, the persisted `default_context` from the
//! engine configuration, then answers entered at the prompt. `--replay`
//! short-circuits all of that and reuses the context saved by the previous
//! run for the same template.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tera::Tera;

use crate::config::deep_merge;
use crate::ui::UserInterface;

use super::manifest::TemplateManifest;
use super::{EngineConfig, EngineError, GenerateOptions};

/// Assemble the rendering context for one generation run.
///
/// `template_key` identifies the template in the replay store.
pub fn assemble(
    manifest: &TemplateManifest,
    config: &EngineConfig,
    options: &GenerateOptions,
    template_key: &str,
    ui: &mut dyn UserInterface,
) -> Result<tera::Context, EngineError> {
    let store = config
        .replay_dir
        .clone()
        .unwrap_or_else(crate::config::replay_dir);

    if options.replay {
        let saved = load_replay(&store, template_key)?;
        return mapping_to_context(&saved);
    }

    let mut resolved = Mapping::new();
    let mut ctx = tera::Context::new();

    for var in &manifest.variables {
        let mut default = var.default.clone();
        if let Some(overlay) = config.default_context.get(var.name.as_str()) {
            default = deep_merge(&default, overlay);
        }

        // String defaults may reference earlier answers.
        if let Value::String(s) = &default {
            let rendered = Tera::one_off(s, &ctx, false).map_err(|e| EngineError::Render {
                path: format!("default for '{}'", var.name),
                message: e.to_string(),
            })?;
            default = Value::String(rendered);
        }

        let value = if options.no_input {
            default
        } else {
            prompt_value(ui, var.prompt.as_deref(), &var.name, default)?
        };

        insert_context(&mut ctx, &var.name, &value)?;
        resolved.insert(Value::String(var.name.clone()), value);
    }

    save_replay(&store, template_key, &resolved)?;

    Ok(ctx)
}

/// Ask for one variable, falling back to its default on plain enter.
///
/// Answers for non-string defaults are re-parsed as YAML scalars so numeric
/// and boolean variables keep their type; string variables always stay
/// strings.
fn prompt_value(
    ui: &mut dyn UserInterface,
    prompt: Option<&str>,
    name: &str,
    default: Value,
) -> Result<Value, EngineError> {
    let question = prompt.unwrap_or(name);
    let shown = display_value(&default);
    let answer = ui
        .input(name, question, &shown)
        .map_err(|e| EngineError::Input {
            message: e.to_string(),
        })?;

    if answer == shown {
        return Ok(default);
    }

    if matches!(default, Value::String(_) | Value::Null) {
        Ok(Value::String(answer))
    } else {
        Ok(serde_yaml::from_str(&answer).unwrap_or(Value::String(answer)))
    }
}

/// Render a default for display at the prompt.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn insert_context(
    ctx: &mut tera::Context,
    name: &str,
    value: &Value,
) -> Result<(), EngineError> {
    let json = serde_json::to_value(value).map_err(|e| EngineError::Context {
        message: format!("value for '{}' is not representable: {}", name, e),
    })?;
    ctx.insert(name, &json);
    Ok(())
}

fn mapping_to_context(mapping: &Mapping) -> Result<tera::Context, EngineError> {
    let mut ctx = tera::Context::new();
    for (key, value) in mapping {
        let Some(name) = key.as_str() else {
            return Err(EngineError::Context {
                message: "replay context keys must be strings".to_string(),
            });
        };
        insert_context(&mut ctx, name, value)?;
    }
    Ok(ctx)
}

fn replay_path(store: &Path, template_key: &str) -> std::path::PathBuf {
    store.join(format!("{template_key}.yml"))
}

fn load_replay(store: &Path, template_key: &str) -> Result<Mapping, EngineError> {
    let path = replay_path(store, template_key);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EngineError::ReplayMissing {
                template: template_key.to_string(),
            });
        }
        Err(e) => return Err(EngineError::Io(e)),
    };

    let value: Value = serde_yaml::from_str(&content).map_err(|e| EngineError::Config {
        path: path.clone(),
        message: e.to_string(),
    })?;

    value
        .as_mapping()
        .cloned()
        .ok_or_else(|| EngineError::Config {
            path,
            message: "replay context is not a mapping".to_string(),
        })
}

fn save_replay(store: &Path, template_key: &str, resolved: &Mapping) -> Result<(), EngineError> {
    fs::create_dir_all(store)?;
    let content = serde_yaml::to_string(&Value::Mapping(resolved.clone())).map_err(|e| {
        EngineError::Context {
            message: e.to_string(),
        }
    })?;
    fs::write(replay_path(store, template_key), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::manifest::TemplateVariable;
    use crate::ui::MockUi;
    use tempfile::TempDir;

    fn manifest(vars: &[(&str, Value)]) -> TemplateManifest {
        TemplateManifest {
            description: "test".into(),
            registry: None,
            variables: vars
                .iter()
                .map(|(name, default)| TemplateVariable {
                    name: name.to_string(),
                    prompt: None,
                    default: default.clone(),
                })
                .collect(),
        }
    }

    fn config_with_store(temp: &TempDir) -> EngineConfig {
        EngineConfig {
            replay_dir: Some(temp.path().join("replay")),
            ..Default::default()
        }
    }

    #[test]
    fn no_input_takes_defaults() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[("project_name", Value::String("demo".into()))]);
        let options = GenerateOptions {
            no_input: true,
            ..Default::default()
        };
        let mut ui = MockUi::new();

        let ctx = assemble(
            &manifest,
            &config_with_store(&temp),
            &options,
            "tpl",
            &mut ui,
        )
        .unwrap();

        assert_eq!(ctx.get("project_name").unwrap(), "demo");
        assert!(ui.inputs_shown().is_empty());
    }

    #[test]
    fn config_default_context_overrides_manifest_default() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[("author", Value::String("nobody".into()))]);
        let mut config = config_with_store(&temp);
        config.default_context.insert(
            Value::String("author".into()),
            Value::String("Jane".into()),
        );
        let options = GenerateOptions {
            no_input: true,
            ..Default::default()
        };

        let ctx = assemble(&manifest, &config, &options, "tpl", &mut MockUi::new()).unwrap();

        assert_eq!(ctx.get("author").unwrap(), "Jane");
    }

    #[test]
    fn string_defaults_render_against_earlier_answers() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[
            ("project_name", Value::String("my-app".into())),
            (
                "package_name",
                Value::String("{{ project_name | replace(from=\"-\", to=\"_\") }}".into()),
            ),
        ]);
        let options = GenerateOptions {
            no_input: true,
            ..Default::default()
        };

        let ctx = assemble(
            &manifest,
            &config_with_store(&temp),
            &options,
            "tpl",
            &mut MockUi::new(),
        )
        .unwrap();

        assert_eq!(ctx.get("package_name").unwrap(), "my_app");
    }

    #[test]
    fn prompt_answers_override_defaults() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[("project_name", Value::String("demo".into()))]);
        let mut ui = MockUi::new();
        ui.set_input_response("project_name", "widget");

        let ctx = assemble(
            &manifest,
            &config_with_store(&temp),
            &GenerateOptions::default(),
            "tpl",
            &mut ui,
        )
        .unwrap();

        assert_eq!(ctx.get("project_name").unwrap(), "widget");
        assert_eq!(ui.inputs_shown(), ["project_name".to_string()]);
    }

    #[test]
    fn numeric_answers_stay_numeric() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[("port", Value::Number(8080.into()))]);
        let mut ui = MockUi::new();
        ui.set_input_response("port", "9090");

        let ctx = assemble(
            &manifest,
            &config_with_store(&temp),
            &GenerateOptions::default(),
            "tpl",
            &mut ui,
        )
        .unwrap();

        assert_eq!(ctx.get("port").unwrap(), 9090);
    }

    #[test]
    fn replay_reuses_saved_context() {
        let temp = TempDir::new().unwrap();
        let config = config_with_store(&temp);
        let manifest = manifest(&[("project_name", Value::String("demo".into()))]);

        let mut ui = MockUi::new();
        ui.set_input_response("project_name", "first-run");
        assemble(&manifest, &config, &GenerateOptions::default(), "tpl", &mut ui).unwrap();

        // Second run replays the recorded answer without prompting.
        let mut ui = MockUi::new();
        ui.set_input_response("project_name", "second-run");
        let options = GenerateOptions {
            replay: true,
            ..Default::default()
        };
        let ctx = assemble(&manifest, &config, &options, "tpl", &mut ui).unwrap();

        assert_eq!(ctx.get("project_name").unwrap(), "first-run");
        assert!(ui.inputs_shown().is_empty());
    }

    #[test]
    fn replay_without_saved_context_is_an_error() {
        let temp = TempDir::new().unwrap();
        let manifest = manifest(&[]);
        let options = GenerateOptions {
            replay: true,
            ..Default::default()
        };

        let result = assemble(
            &manifest,
            &config_with_store(&temp),
            &options,
            "never-run",
            &mut MockUi::new(),
        );

        assert!(matches!(
            result,
            Err(EngineError::ReplayMissing { template }) if template == "never-run"
        ));
    }
}
