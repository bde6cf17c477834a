//! Host page seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every startup component talks to the browser through [`Page`]. The web
//! implementation lives in `page_web` (feature `csr`); tests drive a fake
//! with a virtual clock. Execution is single-threaded and callback based:
//! timers and the `load` listener hand back boxed closures that the page
//! invokes later on the same thread.

use std::time::Duration;

/// Deferred work handed to the page.
pub type Callback = Box<dyn FnOnce()>;

/// Completion for a service worker registration: the registration scope on
/// success, a printable reason on failure.
pub type RegistrationCallback = Box<dyn FnOnce(Result<String, String>)>;

/// The navigation-timing record for the current page, in milliseconds
/// relative to the time origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationTiming {
    pub fetch_start: f64,
    pub load_event_end: f64,
}

impl NavigationTiming {
    /// Duration from fetch start to load event end, or `None` while the
    /// load event has not finished.
    #[must_use]
    pub fn load_time_ms(&self) -> Option<f64> {
        if self.load_event_end < self.fetch_start {
            None
        } else {
            Some(self.load_event_end - self.fetch_start)
        }
    }
}

/// Browser capabilities used during startup.
pub trait Page: 'static {
    /// Handle to a DOM element, cheap to clone.
    type Node: Clone + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// Detach `node` from the document. Removing a detached node is a no-op.
    fn remove(&self, node: &Self::Node);

    /// Run `callback` once after `delay`. Timers cannot be cancelled.
    fn set_timeout(&self, delay: Duration, callback: Callback);

    /// Run `callback` once when the window `load` event fires.
    fn on_load(&self, callback: Callback);

    fn service_worker_supported(&self) -> bool;

    /// Start registering the worker script at `script_url`; `done` runs
    /// once with the outcome.
    fn register_service_worker(&self, script_url: &str, done: RegistrationCallback);

    fn navigation_timing(&self) -> Option<NavigationTiming>;
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
