//! # app-shell
//!
//! Startup orchestration for a Leptos + WASM single-page application.
//! Registers the icon catalog, starts the data backend and audio services,
//! mounts the embedder's root view on `#app`, then tears down the `#loading`
//! overlay, registers the offline service worker, and (in production) logs
//! page load timing.
//!
//! Browser bindings are gated behind the `csr` feature. Without it the
//! orchestrator and every startup component build natively against the
//! [`page::Page`] seam, which is how the unit tests drive them.

pub mod app;
pub mod boot;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod error_boundary;
pub mod icons;
pub mod loading;
pub mod page;
#[cfg(feature = "csr")]
pub mod page_web;
pub mod perf;
pub mod registry;
#[cfg(feature = "csr")]
pub mod render;
pub mod services;
pub mod store;
pub mod worker;

#[cfg(test)]
mod page_fake;

pub use boot::{Shell, Startup, boot};
pub use config::ShellConfig;
pub use error::{ServiceError, ShellError};

/// Id of the optional `<script type="application/json">` element holding
/// runtime config overrides.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

/// Boot the application in the browser with `root` as the UI tree.
///
/// The returned shell lives for the rest of the page.
///
/// # Errors
///
/// Returns [`ShellError::NoWindow`] when called outside a browser window.
#[cfg(feature = "csr")]
pub fn launch<F, V>(root: F) -> Result<&'static Shell<page_web::WebPage>, ShellError>
where
    F: Fn() -> V + Clone + Send + 'static,
    V: leptos::prelude::IntoView + 'static,
{
    use std::rc::Rc;
    use std::sync::Arc;

    use services::audio::AudioSubsystem;
    use services::backend::DataBackend;
    use store::Provide;

    console_error_panic_hook::set_once();

    let (mut config, rejected) = ShellConfig::from_build_env();
    for e in rejected {
        web_sys::console::error_1(&format!("{e}; keeping the default").into());
    }
    let page = Rc::new(page_web::WebPage::new()?);
    if let Some(json) = page.text_of(CONFIG_ELEMENT_ID) {
        if let Err(e) = config.apply_overrides_json(&json) {
            web_sys::console::warn_1(&format!("ignoring #{CONFIG_ELEMENT_ID}: {e}").into());
        }
    }

    diagnostics::init_logging(config.log_level);
    let diagnostics = diagnostics::Diagnostics::new();

    let backend = Arc::new(DataBackend::new(config.backend.clone()));
    let audio = Arc::new(AudioSubsystem::new(config.audio));
    let provide_backend = Provide::new("backend", Arc::clone(&backend));
    let provide_audio = Provide::new("audio", Arc::clone(&audio));

    // Holds the view error hook for the page lifetime.
    let renderer: &'static render::LeptosRenderer<F> = Box::leak(Box::new(render::LeptosRenderer::new(root)));
    let startup = Startup {
        catalog: icons::CATALOG,
        plugins: &[&provide_backend, &provide_audio],
        services: &[&*backend, &*audio],
    };
    let shell = boot(&config, page, renderer, startup, diagnostics);

    error_boundary::install_panic_hook(shell.boundary.hook());
    Ok(Box::leak(Box::new(shell)))
}
