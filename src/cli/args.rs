//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Plinth - scaffold application structures from project templates.
#[derive(Debug, Parser)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug information
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an application structure
    New(NewArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// List the available templates
    #[arg(short, long)]
    pub list: bool,

    /// Template to use: a registered name, a directory, or a repository URL
    #[arg(default_value = "default")]
    pub template: String,

    /// Path into the template directory
    #[arg(default_value = "")]
    pub path: String,

    /// Don't prompt for template variables; use default settings
    #[arg(long)]
    pub no_input: bool,

    /// The branch, tag or commit ID to checkout after clone
    #[arg(long, value_name = "REF")]
    pub checkout: Option<String>,

    /// Do not prompt for variables and only use answers entered previously
    #[arg(short, long, conflicts_with = "no_input")]
    pub replay: bool,

    /// Directory where to generate the project into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overwrite the contents of the output directory if it already exists
    #[arg(short = 'f', long)]
    pub overwrite: bool,
}

impl Default for NewArgs {
    fn default() -> Self {
        Self {
            list: false,
            template: "default".to_string(),
            path: String::new(),
            no_input: false,
            checkout: None,
            replay: false,
            output_dir: None,
            overwrite: false,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
