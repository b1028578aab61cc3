//! The combining registry.
//!
//! Collects descriptors from all providers, expands aliases into additional
//! entries, stably sorts everything by load-order key, and resolves name
//! collisions deterministically: the first registration wins, so an alias
//! can never displace an earlier primary entry.

use crate::error::Result;
use crate::registry::entry::TemplateEntry;
use crate::registry::{builtin, local};

/// Template registry, loaded once per command invocation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<TemplateEntry>,
}

impl Registry {
    /// Load the registry from all providers.
    pub fn load() -> Result<Self> {
        let mut collected = builtin::entries()?;
        collected.extend(local::entries()?);
        Ok(Self::from_entries(collected))
    }

    /// Build a registry from primary entries.
    ///
    /// Aliases are appended after all primaries, the combined list is
    /// stably sorted by load-order key, and duplicate names are dropped
    /// (first wins).
    pub fn from_entries(primaries: Vec<TemplateEntry>) -> Self {
        let mut expanded = primaries.clone();
        for entry in &primaries {
            for alias in &entry.aliases {
                expanded.push(entry.aliased(alias));
            }
        }

        expanded.sort_by_key(|entry| entry.load_order);

        let mut entries: Vec<TemplateEntry> = Vec::new();
        for entry in expanded {
            if !entries.iter().any(|existing| existing.name == entry.name) {
                entries.push(entry);
            }
        }

        Self { entries }
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries (primaries plus surviving aliases).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Remove and return an entry by name.
    pub fn remove(&mut self, name: &str) -> Option<TemplateEntry> {
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(index))
    }

    /// All entries, in load order.
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }
}
