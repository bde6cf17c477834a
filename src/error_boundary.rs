//! Global error boundary.
//!
//! DESIGN
//! ======
//! The rendering runtime calls the application's error hook for every UI
//! error nobody else caught. The boundary logs the error with its context
//! and counts it. Records are not retained. It never re-throws, never
//! unmounts, and the application keeps running.
//!
//! Remote error reporting would hang off [`ErrorBoundary::handle`]; it is
//! not implemented.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::diagnostics::Diagnostics;

#[cfg(test)]
#[path = "error_boundary_test.rs"]
mod error_boundary_test;

/// An error value surfaced by the rendering runtime.
pub type UiError = Arc<dyn std::error::Error + Send + Sync>;

/// Hook installed on the application instance.
pub type ErrorHook = Arc<dyn Fn(&ErrorRecord) + Send + Sync>;

/// One uncaught UI error with its context.
#[derive(Clone)]
pub struct ErrorRecord {
    pub error: UiError,
    /// Runtime-supplied description of where the error happened.
    pub info: String,
}

impl ErrorRecord {
    pub fn new(error: UiError, info: impl Into<String>) -> Self {
        Self { error, info: info.into() }
    }
}

impl fmt::Debug for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorRecord")
            .field("error", &self.error.to_string())
            .field("info", &self.info)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ErrorBoundary {
    diagnostics: Diagnostics,
    handled: Arc<AtomicUsize>,
}

impl ErrorBoundary {
    #[must_use]
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self { diagnostics, handled: Arc::default() }
    }

    pub fn handle(&self, record: &ErrorRecord) {
        self.diagnostics
            .error(format!("global error in {}: {}", record.info, record.error));
        self.handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Hook that forwards to this boundary, for installation on the app.
    #[must_use]
    pub fn hook(&self) -> ErrorHook {
        let boundary = self.clone();
        Arc::new(move |record: &ErrorRecord| boundary.handle(record))
    }

    /// Number of records handled so far.
    #[must_use]
    pub fn handled(&self) -> usize {
        self.handled.load(Ordering::Relaxed)
    }
}

/// Receives errors thrown by Leptos views (a `Result` view rendering `Err`)
/// and forwards each one to the application error hook. The failing view
/// renders nothing; the rest of the tree is untouched.
pub struct ThrownErrorHook {
    hook: Option<ErrorHook>,
    diagnostics: Diagnostics,
    next_id: AtomicUsize,
}

impl ThrownErrorHook {
    #[must_use]
    pub fn new(hook: Option<ErrorHook>, diagnostics: Diagnostics) -> Self {
        Self { hook, diagnostics, next_id: AtomicUsize::new(0) }
    }
}

impl leptos::error::ErrorHook for ThrownErrorHook {
    fn throw(&self, error: leptos::error::Error) -> leptos::error::ErrorId {
        let record = ErrorRecord::new(error.into_inner(), "render");
        match &self.hook {
            Some(hook) => hook(&record),
            None => self.diagnostics.error(format!("unhandled UI error: {} ({})", record.error, record.info)),
        }
        leptos::error::ErrorId::from(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn clear(&self, _id: &leptos::error::ErrorId) {}
}

/// Panic payload forwarded to the error hook.
#[derive(Debug, thiserror::Error)]
#[error("panic: {0}")]
pub struct PanicMessage(pub String);

/// Chain the console panic hook with `hook`, so panics are printed with a
/// stack trace and also reach the application's error boundary.
#[cfg(feature = "csr")]
pub fn install_panic_hook(hook: ErrorHook) {
    std::panic::set_hook(Box::new(move |info| {
        console_error_panic_hook::hook(info);
        let record = ErrorRecord::new(Arc::new(PanicMessage(info.to_string())), "panic");
        hook(&record);
    }));
}
