//! Page load timing report, production builds only.
//!
//! On `load`, reads the navigation-timing record and logs the time from
//! fetch start to load event end. The read is deferred by a zero-delay timer
//! because the load event end is only stamped once the `load` handlers
//! return. A missing or unfinished record is skipped silently.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::diagnostics::Diagnostics;
use crate::page::Page;

#[cfg(test)]
#[path = "perf_test.rs"]
mod perf_test;

pub struct PerformanceReporter<P: Page> {
    page: Rc<P>,
    production: bool,
    diagnostics: Diagnostics,
    load_time_ms: Rc<Cell<Option<f64>>>,
}

impl<P: Page> Clone for PerformanceReporter<P> {
    fn clone(&self) -> Self {
        Self {
            page: Rc::clone(&self.page),
            production: self.production,
            diagnostics: self.diagnostics.clone(),
            load_time_ms: Rc::clone(&self.load_time_ms),
        }
    }
}

impl<P: Page> PerformanceReporter<P> {
    pub fn new(page: Rc<P>, production: bool, diagnostics: Diagnostics) -> Self {
        Self { page, production, diagnostics, load_time_ms: Rc::default() }
    }

    /// The reported load time, once logged.
    #[must_use]
    pub fn load_time_ms(&self) -> Option<f64> {
        self.load_time_ms.get()
    }

    /// Listen for `load`. Does nothing outside production.
    pub fn arm(&self) {
        if !self.production {
            return;
        }
        let reporter = self.clone();
        self.page.on_load(Box::new(move || {
            let deferred = reporter.clone();
            reporter
                .page
                .set_timeout(Duration::ZERO, Box::new(move || deferred.report()));
        }));
    }

    fn report(&self) {
        if self.load_time_ms.get().is_some() {
            return;
        }
        let Some(elapsed) = self.page.navigation_timing().and_then(|t| t.load_time_ms()) else {
            return;
        };
        self.load_time_ms.set(Some(elapsed));
        self.diagnostics.info(format!("page load time: {elapsed} ms"));
    }
}
