//! [`Page`] backed by the real browser window.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, PerformanceNavigationTiming, ServiceWorkerRegistration, Window};

use crate::diagnostics::LOG_TARGET;
use crate::error::ShellError;
use crate::page::{Callback, NavigationTiming, Page, RegistrationCallback};

pub struct WebPage {
    window: Window,
}

impl WebPage {
    /// # Errors
    ///
    /// Returns [`ShellError::NoWindow`] outside a browser main thread.
    pub fn new() -> Result<Self, ShellError> {
        web_sys::window().map(|window| Self { window }).ok_or(ShellError::NoWindow)
    }

    fn document(&self) -> Option<Document> {
        self.window.document()
    }

    /// Text content of the element `id`, used for inline JSON config.
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document()?.get_element_by_id(id)?.text_content()
    }
}

fn timeout_ms(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

pub(crate) fn describe_js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}

impl Page for WebPage {
    type Node = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document()?.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = node.style().set_property(property, value) {
            log::debug!(target: LOG_TARGET, "set {property} failed: {}", describe_js_error(&e));
        }
    }

    fn remove(&self, node: &HtmlElement) {
        node.remove();
    }

    fn set_timeout(&self, delay: Duration, callback: Callback) {
        Timeout::new(timeout_ms(delay), callback).forget();
    }

    fn on_load(&self, callback: Callback) {
        // The module may start after the document finished loading, in which
        // case `load` has already fired and will not fire again.
        let complete = self.document().is_some_and(|d| d.ready_state() == "complete");
        if complete {
            Timeout::new(0, callback).forget();
            return;
        }
        let listener = Closure::once_into_js(move || callback());
        if let Err(e) = self.window.add_event_listener_with_callback("load", listener.unchecked_ref()) {
            log::warn!(target: LOG_TARGET, "load listener not attached: {}", describe_js_error(&e));
        }
    }

    fn service_worker_supported(&self) -> bool {
        js_sys::Reflect::has(&self.window.navigator(), &JsValue::from_str("serviceWorker")).unwrap_or(false)
    }

    fn register_service_worker(&self, script_url: &str, done: RegistrationCallback) {
        let promise = self.window.navigator().service_worker().register(script_url);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = JsFuture::from(promise)
                .await
                .map(|value| value.unchecked_into::<ServiceWorkerRegistration>().scope())
                .map_err(|e| describe_js_error(&e));
            done(outcome);
        });
    }

    fn navigation_timing(&self) -> Option<NavigationTiming> {
        let entries = self.window.performance()?.get_entries_by_type("navigation");
        let entry = entries.get(0).dyn_into::<PerformanceNavigationTiming>().ok()?;
        Some(NavigationTiming { fetch_start: entry.fetch_start(), load_event_end: entry.load_event_end() })
    }
}
