//! Application host.
//!
//! DESIGN
//! ======
//! `AppInstance` is the explicit context object for one page: it owns the
//! component registry, the state store, the installed plugin list, and the
//! error hook. It is built once by `boot` and passed by reference to each
//! startup step instead of living in a global.
//!
//! Mounting is delegated to a [`Renderer`]. Components and plugins can only
//! be added before mount; `mount` itself may be called once.

use crate::diagnostics::Diagnostics;
use crate::error::ShellError;
use crate::error_boundary::{ErrorHook, ErrorRecord};
use crate::registry::{ComponentDef, ComponentRegistry};
use crate::store::Store;

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

/// An extension installed on the application before mount (state
/// container wiring, router, UI library).
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a [`ShellError`] if the plugin cannot wire itself in.
    fn install(&self, app: &mut AppInstance) -> Result<(), ShellError>;
}

/// Attaches the application's UI tree to the page.
pub trait Renderer {
    /// Render `app` into the element matched by `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::MountTargetMissing`] if nothing matches
    /// `selector`, or [`ShellError::NoWindow`] outside a browser.
    fn render(&self, selector: &str, app: &AppInstance) -> Result<(), ShellError>;
}

/// Resolve the outcome of a selector query into a mount target. A query
/// that failed means the selector itself is malformed.
///
/// # Errors
///
/// Returns [`ShellError::InvalidSelector`] for a failed query and
/// [`ShellError::MountTargetMissing`] when nothing matched.
pub fn mount_target<T>(selector: &str, query: Result<Option<T>, String>) -> Result<T, ShellError> {
    match query {
        Ok(Some(target)) => Ok(target),
        Ok(None) => Err(ShellError::MountTargetMissing { selector: selector.to_owned() }),
        Err(reason) => Err(ShellError::InvalidSelector { selector: selector.to_owned(), reason }),
    }
}

pub struct AppInstance {
    components: ComponentRegistry,
    store: Store,
    plugins: Vec<&'static str>,
    error_hook: Option<ErrorHook>,
    mounted_on: Option<String>,
    diagnostics: Diagnostics,
}

impl AppInstance {
    #[must_use]
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            components: ComponentRegistry::new(),
            store: Store::new(),
            plugins: Vec::new(),
            error_hook: None,
            mounted_on: None,
            diagnostics,
        }
    }

    /// Register a named component globally.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::RegistryFrozen`] after mount.
    pub fn component(&mut self, name: &str, def: ComponentDef) -> Result<(), ShellError> {
        self.components.register(name, def)?;
        self.diagnostics.debug(format!("registered component {name}"));
        Ok(())
    }

    #[must_use]
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Install `plugin`. A plugin whose name is already installed is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::AlreadyMounted`] after mount, or whatever the
    /// plugin's own `install` returns.
    pub fn use_plugin(&mut self, plugin: &dyn Plugin) -> Result<(), ShellError> {
        if let Some(target) = &self.mounted_on {
            return Err(ShellError::AlreadyMounted { target: target.clone() });
        }
        let name = plugin.name();
        if self.plugins.contains(&name) {
            self.diagnostics.warn(format!("plugin {name} already installed; skipping"));
            return Ok(());
        }
        plugin.install(self)?;
        self.plugins.push(name);
        Ok(())
    }

    #[must_use]
    pub fn plugins(&self) -> &[&'static str] {
        &self.plugins
    }

    pub fn set_error_handler(&mut self, hook: ErrorHook) {
        self.error_hook = Some(hook);
    }

    #[must_use]
    pub fn error_handler(&self) -> Option<ErrorHook> {
        self.error_hook.clone()
    }

    /// Entry point for the rendering runtime: deliver one uncaught UI error
    /// to the installed hook. Without a hook the error is logged directly.
    pub fn report_error(&self, record: &ErrorRecord) {
        match &self.error_hook {
            Some(hook) => hook(record),
            None => self
                .diagnostics
                .error(format!("unhandled UI error: {} ({})", record.error, record.info)),
        }
    }

    /// Mount the UI tree on `selector` and freeze the component registry.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::AlreadyMounted`] on a second call, or the
    /// renderer's error. A failed mount leaves the instance unmounted.
    pub fn mount(&mut self, selector: &str, renderer: &dyn Renderer) -> Result<(), ShellError> {
        if let Some(target) = &self.mounted_on {
            return Err(ShellError::AlreadyMounted { target: target.clone() });
        }
        renderer.render(selector, self)?;
        self.components.freeze();
        self.mounted_on = Some(selector.to_owned());
        Ok(())
    }

    #[must_use]
    pub fn mounted_on(&self) -> Option<&str> {
        self.mounted_on.as_deref()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted_on.is_some()
    }
}
