//! Audio subsystem bootstrap.
//!
//! Validates the master volume and, in the browser, builds the page's
//! single `AudioContext` with a master gain node feeding the destination.
//! Browsers keep a fresh context suspended until the first user gesture;
//! playback code resumes it.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Service;
use crate::config::AudioConfig;
use crate::error::ServiceError;

#[cfg(test)]
#[path = "audio_test.rs"]
mod audio_test;

pub const SERVICE_NAME: &str = "audio";

#[derive(Debug, Default)]
pub struct AudioSubsystem {
    config: AudioConfig,
    ready: AtomicBool,
}

impl AudioSubsystem {
    #[must_use]
    pub fn new(config: AudioConfig) -> Self {
        Self { config, ready: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn master_volume(&self) -> f32 {
        self.config.master_volume
    }
}

impl Service for AudioSubsystem {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    fn init(&self) -> Result<(), ServiceError> {
        if self.is_ready() {
            return Err(ServiceError::AlreadyInitialized { service: SERVICE_NAME });
        }
        let volume = self.config.master_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ServiceError::NotConfigured {
                service: SERVICE_NAME,
                reason: format!("master volume {volume} outside 0.0..=1.0"),
            });
        }

        #[cfg(feature = "csr")]
        engine::start(volume)?;

        self.ready.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(feature = "csr")]
pub use engine::{AudioEngine, with_engine};

#[cfg(feature = "csr")]
mod engine {
    use std::cell::OnceCell;

    use web_sys::{AudioContext, GainNode};

    use super::SERVICE_NAME;
    use crate::error::ServiceError;

    /// The page's audio graph root.
    pub struct AudioEngine {
        pub context: AudioContext,
        pub master: GainNode,
    }

    thread_local! {
        static ENGINE: OnceCell<AudioEngine> = const { OnceCell::new() };
    }

    fn unavailable(what: &str, err: &wasm_bindgen::JsValue) -> ServiceError {
        ServiceError::Unavailable { service: SERVICE_NAME, reason: format!("{what}: {err:?}") }
    }

    pub(super) fn start(volume: f32) -> Result<(), ServiceError> {
        let context = AudioContext::new().map_err(|e| unavailable("AudioContext", &e))?;
        let master = context.create_gain().map_err(|e| unavailable("gain node", &e))?;
        master.gain().set_value(volume);
        master
            .connect_with_audio_node(&context.destination())
            .map_err(|e| unavailable("connect master", &e))?;

        ENGINE.with(|slot| {
            slot.set(AudioEngine { context, master })
                .map_err(|_| ServiceError::AlreadyInitialized { service: SERVICE_NAME })
        })
    }

    /// Run `f` against the audio engine, if it has been started.
    pub fn with_engine<R>(f: impl FnOnce(&AudioEngine) -> R) -> Option<R> {
        ENGINE.with(|slot| slot.get().map(f))
    }
}
