//! Named component registry.
//!
//! DESIGN
//! ======
//! Components are registered from an explicit, statically enumerable list
//! (see `icons::CATALOG`) rather than by walking a module namespace. The
//! registry is frozen when the application mounts; later registrations are
//! rejected so every name the UI can reference exists before first render.

use crate::error::ShellError;

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

/// An SVG component definition: a view box plus one or more path outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDef {
    pub view_box: &'static str,
    pub paths: &'static [&'static str],
}

/// Registered components in registration order. Re-registering a name
/// replaces the earlier definition in place.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: Vec<(String, ComponentDef)>,
    frozen: bool,
}

impl ComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `def` under `name`; last registration wins.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::RegistryFrozen`] once the application is mounted.
    pub fn register(&mut self, name: &str, def: ComponentDef) -> Result<(), ShellError> {
        if self.frozen {
            return Err(ShellError::RegistryFrozen { name: name.to_owned() });
        }
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = def,
            None => self.entries.push((name.to_owned(), def)),
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentDef> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, def)| def)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }
}
