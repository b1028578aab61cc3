//! User configuration loading, pruning, and merging.
//!
//! Plinth reads (and never writes) a single user-level configuration file,
//! `~/.plinth/config.yml`. The `generator` section of that file carries
//! persisted defaults for the generation engine; before it is handed over,
//! empty values are recursively pruned so the engine only ever sees
//! meaningful settings.

pub mod merge;
pub mod prune;
pub mod user;

pub use merge::deep_merge;
pub use prune::prune_empty;
pub use user::{
    builtin_dir, clones_dir, generator_section, load_user_config, plinth_home, replay_dir,
    user_config_path,
};
