//! Leptos renderer.
//!
//! Mounts the embedder's root view on the configured selector, with the
//! component registry and state store provided as contexts for every
//! descendant. Errors thrown by views are routed to the application error
//! hook through a process-wide Leptos error hook; nothing replaces the tree.

use std::cell::RefCell;
use std::sync::Arc;

use leptos::error::{ResetErrorHookOnDrop, set_error_hook};
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::app::{AppInstance, Renderer, mount_target};
use crate::error::ShellError;
use crate::error_boundary::ThrownErrorHook;
use crate::page_web::describe_js_error;

pub struct LeptosRenderer<F> {
    root: F,
    // Restores the previous hook when dropped.
    error_hook: RefCell<Option<ResetErrorHookOnDrop>>,
}

impl<F> LeptosRenderer<F> {
    pub fn new(root: F) -> Self {
        Self { root, error_hook: RefCell::new(None) }
    }
}

impl<F, V> Renderer for LeptosRenderer<F>
where
    F: Fn() -> V + Clone + Send + 'static,
    V: IntoView + 'static,
{
    fn render(&self, selector: &str, app: &AppInstance) -> Result<(), ShellError> {
        let document = web_sys::window().and_then(|w| w.document()).ok_or(ShellError::NoWindow)?;
        let query = document
            .query_selector(selector)
            .map(|found| found.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
            .map_err(|e| describe_js_error(&e));
        let target = mount_target(selector, query)?;

        let thrown = ThrownErrorHook::new(app.error_handler(), app.diagnostics().clone());
        *self.error_hook.borrow_mut() = Some(set_error_hook(Arc::new(thrown)));

        let components = app.components().clone();
        let store = app.store().clone();
        let root = self.root.clone();

        mount_to(target, move || {
            provide_context(components);
            provide_context(store);
            root()
        })
        .forget();
        Ok(())
    }
}
