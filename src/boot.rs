//! Startup orchestrator.
//!
//! DESIGN
//! ======
//! `boot` runs the startup sequence once, in a fixed order:
//!
//! 1. build the application instance and install the error boundary
//! 2. register the component catalog, then install plugins
//! 3. initialize the external services (backend, then audio)
//! 4. mount on the configured selector
//! 5. schedule the loading screen teardown
//! 6. arm the offline worker and performance `load` listeners
//!
//! Steps 5 and 6 suspend on timers and the `load` event, which may fire in
//! any relative order. Nothing here returns an error to the caller: every
//! failure is logged at the step that produced it and startup continues.

use std::rc::Rc;

use crate::app::{AppInstance, Plugin, Renderer};
use crate::config::ShellConfig;
use crate::diagnostics::Diagnostics;
use crate::error_boundary::ErrorBoundary;
use crate::loading::LoadingScreen;
use crate::page::Page;
use crate::perf::PerformanceReporter;
use crate::registry::ComponentDef;
use crate::services::{Service, init_services};
use crate::worker::OfflineWorker;

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

/// Collaborators handed to [`boot`].
#[derive(Default)]
pub struct Startup<'a> {
    /// Components registered before mount, in order.
    pub catalog: &'a [(&'a str, ComponentDef)],
    pub plugins: &'a [&'a dyn Plugin],
    /// Started in order, before mount.
    pub services: &'a [&'a dyn Service],
}

/// Handles to everything `boot` started, alive for the page lifetime.
pub struct Shell<P: Page> {
    pub app: AppInstance,
    pub boundary: ErrorBoundary,
    pub loading: LoadingScreen<P>,
    pub worker: OfflineWorker<P>,
    pub perf: PerformanceReporter<P>,
    pub diagnostics: Diagnostics,
}

pub fn boot<P: Page>(
    config: &ShellConfig,
    page: Rc<P>,
    renderer: &dyn Renderer,
    startup: Startup<'_>,
    diagnostics: Diagnostics,
) -> Shell<P> {
    let mut app = AppInstance::new(diagnostics.clone());
    let boundary = ErrorBoundary::new(diagnostics.clone());
    app.set_error_handler(boundary.hook());

    for (name, def) in startup.catalog {
        if let Err(e) = app.component(name, *def) {
            diagnostics.error(format!("component {name} not registered: {e}"));
        }
    }
    for plugin in startup.plugins {
        if let Err(e) = app.use_plugin(*plugin) {
            diagnostics.error(format!("plugin {} not installed: {e}", plugin.name()));
        }
    }

    init_services(startup.services, &diagnostics);

    match app.mount(&config.mount_selector, renderer) {
        Ok(()) => diagnostics.info(format!("mounted on {}", config.mount_selector)),
        Err(e) => diagnostics.error(format!("mount failed: {e}")),
    }

    let loading = LoadingScreen::new(Rc::clone(&page), &config.loading_element_id, config.fade_delay);
    loading.schedule(config.loading_delay);

    let worker = OfflineWorker::new(Rc::clone(&page), &config.service_worker_url, diagnostics.clone());
    worker.arm();

    let perf = PerformanceReporter::new(page, config.production, diagnostics.clone());
    perf.arm();

    Shell { app, boundary, loading, worker, perf, diagnostics }
}
