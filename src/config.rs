//! Startup configuration.
//!
//! Values are captured from the build environment with `option_env!` and
//! may be overridden at runtime by a JSON blob embedded in the page. The
//! production flag is injected here rather than read from a global so the
//! orchestrator can be exercised under both settings.

use std::str::FromStr;
use std::time::Duration;

use log::Level;
use serde::Deserialize;

use crate::error::ShellError;

pub const DEFAULT_MOUNT_SELECTOR: &str = "#app";
pub const DEFAULT_LOADING_ELEMENT_ID: &str = "loading";
pub const DEFAULT_SERVICE_WORKER_URL: &str = "/sw.js";
pub const DEFAULT_LOADING_DELAY_MS: u64 = 1000;
pub const DEFAULT_FADE_DELAY_MS: u64 = 500;
pub const DEFAULT_AUDIO_VOLUME: f32 = 0.8;

pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_LOG_LEVEL: &str = "APP_LOG_LEVEL";
pub const ENV_BACKEND_URL: &str = "APP_BACKEND_URL";
pub const ENV_BACKEND_ANON_KEY: &str = "APP_BACKEND_ANON_KEY";
pub const ENV_AUDIO_VOLUME: &str = "APP_AUDIO_VOLUME";

/// Connection settings for the data backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub anon_key: Option<String>,
}

/// Settings for the audio subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioConfig {
    /// Gain applied to the master output, `0.0..=1.0`.
    pub master_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { master_volume: DEFAULT_AUDIO_VOLUME }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub mount_selector: String,
    pub loading_element_id: String,
    /// Delay between mount initiation and the loading screen fade.
    pub loading_delay: Duration,
    /// Delay between the fade and removal of the loading node.
    pub fade_delay: Duration,
    pub service_worker_url: String,
    /// Gates the performance reporter.
    pub production: bool,
    pub log_level: Level,
    pub backend: BackendConfig,
    pub audio: AudioConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let production = !cfg!(debug_assertions);
        Self {
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_owned(),
            loading_element_id: DEFAULT_LOADING_ELEMENT_ID.to_owned(),
            loading_delay: Duration::from_millis(DEFAULT_LOADING_DELAY_MS),
            fade_delay: Duration::from_millis(DEFAULT_FADE_DELAY_MS),
            service_worker_url: DEFAULT_SERVICE_WORKER_URL.to_owned(),
            production,
            log_level: default_level(production),
            backend: BackendConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Build config from the values captured at compile time.
    ///
    /// Malformed values are returned alongside the config, which keeps the
    /// default for each rejected key and every well-formed value.
    pub fn from_build_env() -> (Self, Vec<ShellError>) {
        Self::from_lookup(|key| {
            let value = match key {
                ENV_APP_ENV => option_env!("APP_ENV"),
                ENV_LOG_LEVEL => option_env!("APP_LOG_LEVEL"),
                ENV_BACKEND_URL => option_env!("APP_BACKEND_URL"),
                ENV_BACKEND_ANON_KEY => option_env!("APP_BACKEND_ANON_KEY"),
                ENV_AUDIO_VOLUME => option_env!("APP_AUDIO_VOLUME"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Recognized keys:
    /// - `APP_ENV`: `production` enables the production flag; any other value
    ///   disables it; absent means "release build"
    /// - `APP_LOG_LEVEL`: `error`..`trace`, default `info` in production and
    ///   `debug` otherwise
    /// - `APP_BACKEND_URL`, `APP_BACKEND_ANON_KEY`
    /// - `APP_AUDIO_VOLUME`: master gain, default 0.8
    ///
    /// An unknown log level or a non-numeric volume is reported as a
    /// [`ShellError::ConfigParse`] and that key keeps its default.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ShellError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut rejected = Vec::new();

        if let Some(env) = lookup(ENV_APP_ENV) {
            config.production = env.trim().eq_ignore_ascii_case("production");
            config.log_level = default_level(config.production);
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            match parse_level(&raw) {
                Ok(level) => config.log_level = level,
                Err(e) => rejected.push(e),
            }
        }

        config.backend.base_url = lookup(ENV_BACKEND_URL).and_then(non_empty);
        config.backend.anon_key = lookup(ENV_BACKEND_ANON_KEY).and_then(non_empty);

        if let Some(raw) = lookup(ENV_AUDIO_VOLUME) {
            match parse_volume(&raw) {
                Ok(volume) => config.audio.master_volume = volume,
                Err(e) => rejected.push(e),
            }
        }

        (config, rejected)
    }

    /// Merge a JSON object of runtime overrides into this config. Nothing is
    /// applied unless the whole object is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::ConfigParse`] if the JSON is malformed, carries
    /// unknown fields, or names an unknown log level.
    pub fn apply_overrides_json(&mut self, json: &str) -> Result<(), ShellError> {
        let overrides: ConfigOverrides =
            serde_json::from_str(json).map_err(|e| ShellError::ConfigParse(format!("overrides: {e}")))?;
        let log_level = overrides.log_level.as_deref().map(parse_level).transpose()?;

        if let Some(production) = overrides.production {
            self.production = production;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(url) = overrides.backend_url {
            self.backend.base_url = non_empty(url);
        }
        if let Some(key) = overrides.backend_anon_key {
            self.backend.anon_key = non_empty(key);
        }
        if let Some(volume) = overrides.audio_volume {
            self.audio.master_volume = volume;
        }
        if let Some(url) = overrides.service_worker_url {
            self.service_worker_url = url;
        }
        Ok(())
    }
}

/// Runtime overrides accepted by [`ShellConfig::apply_overrides_json`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    production: Option<bool>,
    log_level: Option<String>,
    backend_url: Option<String>,
    backend_anon_key: Option<String>,
    audio_volume: Option<f32>,
    service_worker_url: Option<String>,
}

fn default_level(production: bool) -> Level {
    if production { Level::Info } else { Level::Debug }
}

fn parse_level(raw: &str) -> Result<Level, ShellError> {
    Level::from_str(raw.trim()).map_err(|_| ShellError::ConfigParse(format!("unknown log level: {raw}")))
}

fn parse_volume(raw: &str) -> Result<f32, ShellError> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ShellError::ConfigParse(format!("invalid {ENV_AUDIO_VOLUME}: {raw}")))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
