//! Diagnostic channel shared by every startup component.
//!
//! DESIGN
//! ======
//! All output goes through one sink and is forwarded to the `log` facade
//! (routed to the browser console by `console_log` under `csr`). A handle
//! built with [`Diagnostics::recording`] also appends each entry to an
//! in-memory journal, so tests can assert on what was written and in what
//! order. The page's own handle keeps no journal.

use std::sync::{Arc, Mutex, MutexGuard};

use log::Level;

pub(crate) const LOG_TARGET: &str = "app_shell";

/// One line written to the diagnostic channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub level: Level,
    pub message: String,
}

type Journal = Arc<Mutex<Vec<Entry>>>;

/// Cloneable handle to the diagnostic channel. Clones share one journal.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    journal: Option<Journal>,
}

impl Diagnostics {
    /// Log-only handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that also keeps every entry in an in-memory journal.
    #[must_use]
    pub fn recording() -> Self {
        Self { journal: Some(Journal::default()) }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.record(Level::Error, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.record(Level::Warn, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.record(Level::Info, message.into());
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.record(Level::Debug, message.into());
    }

    /// Snapshot of the journal, oldest first. Empty for a log-only handle.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.journal.as_ref().map(|j| lock(j).clone()).unwrap_or_default()
    }

    /// Journaled messages at exactly `level`, oldest first.
    #[must_use]
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .map(|e| e.message)
            .collect()
    }

    fn record(&self, level: Level, message: String) {
        log::log!(target: LOG_TARGET, level, "{message}");
        if let Some(journal) = &self.journal {
            lock(journal).push(Entry { level, message });
        }
    }
}

// A poisoned journal still holds valid entries; keep appending.
fn lock(journal: &Journal) -> MutexGuard<'_, Vec<Entry>> {
    match journal.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Route the `log` facade to the browser console.
///
/// Installing twice (for example when the module is re-instantiated by a
/// dev server) leaves the first logger in place.
#[cfg(feature = "csr")]
pub fn init_logging(level: Level) {
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
}

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod tests;
