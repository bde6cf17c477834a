//! External service initializers.
//!
//! ARCHITECTURE
//! ============
//! The data backend and the audio subsystem are started before mount, in
//! that order. Startup does not wait on them and does not gate mounting on
//! their success: each `init` returns a `Result` that the orchestrator only
//! logs. Anything asynchronous a service kicks off (a connectivity probe,
//! audio graph setup) reports through its own logging.

pub mod audio;
pub mod backend;

use crate::diagnostics::Diagnostics;
use crate::error::ServiceError;


pub trait Service {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the service cannot start; the caller
    /// logs it and carries on.
    fn init(&self) -> Result<(), ServiceError>;
}

/// Initialize `services` in order, logging each outcome. Returns how many
/// started successfully.
pub fn init_services(services: &[&dyn Service], diagnostics: &Diagnostics) -> usize {
    let mut ready = 0;
    for service in services {
        match service.init() {
            Ok(()) => {
                diagnostics.info(format!("{} initialized", service.name()));
                ready += 1;
            }
            Err(e) => diagnostics.error(format!("{} init failed: {e}", service.name())),
        }
    }
    ready
}
