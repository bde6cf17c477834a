//! Offline worker registration.
//!
//! Registers the service worker script once the window `load` event fires,
//! but only when the browser supports service workers. The `load` event is
//! independent of mount and may arrive before or after it.
//!
//! ```text
//! Idle --arm--> Unsupported                       (terminal)
//! Idle --arm--> AwaitingLoad --load--> Registering --> Registered | Failed
//! ```
//!
//! Failures are logged and never retried; offline caching is simply not
//! available for the session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::diagnostics::Diagnostics;
use crate::page::Page;

#[cfg(test)]
#[path = "worker_test.rs"]
mod worker_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WorkerState {
    #[default]
    Idle,
    Unsupported,
    AwaitingLoad,
    Registering,
    Registered { scope: String },
    Failed { reason: String },
}

pub struct OfflineWorker<P: Page> {
    page: Rc<P>,
    script_url: String,
    diagnostics: Diagnostics,
    state: Rc<RefCell<WorkerState>>,
}

impl<P: Page> Clone for OfflineWorker<P> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
            script_url: self.script_url.clone(),
            diagnostics: self.diagnostics.clone(),
            state: Rc::clone(&self.state),
        }
    }
}

impl<P: Page> OfflineWorker<P> {
    pub fn new(page: Rc<P>, script_url: &str, diagnostics: Diagnostics) -> Self {
        Self { page, script_url: script_url.to_owned(), diagnostics, state: Rc::default() }
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.state.borrow().clone()
    }

    /// Check for service worker support and, if present, wait for `load`.
    /// Only the first call has any effect.
    pub fn arm(&self) {
        if *self.state.borrow() != WorkerState::Idle {
            return;
        }
        if !self.page.service_worker_supported() {
            self.set_state(WorkerState::Unsupported);
            self.diagnostics.debug("service workers unsupported; offline mode disabled");
            return;
        }

        self.set_state(WorkerState::AwaitingLoad);
        let worker = self.clone();
        self.page.on_load(Box::new(move || worker.register()));
    }

    fn register(&self) {
        if *self.state.borrow() != WorkerState::AwaitingLoad {
            return;
        }
        self.set_state(WorkerState::Registering);

        let state = Rc::clone(&self.state);
        let diagnostics = self.diagnostics.clone();
        self.page.register_service_worker(
            &self.script_url,
            Box::new(move |outcome: Result<String, String>| {
                let next = match outcome {
                    Ok(scope) => {
                        diagnostics.info(format!("SW registered: {scope}"));
                        WorkerState::Registered { scope }
                    }
                    Err(reason) => {
                        diagnostics.warn(format!("SW registration failed: {reason}"));
                        WorkerState::Failed { reason }
                    }
                };
                *state.borrow_mut() = next;
            }),
        );
    }

    fn set_state(&self, next: WorkerState) {
        *self.state.borrow_mut() = next;
    }
}
