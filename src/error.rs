//! Error types for the startup path.
//!
//! ERROR HANDLING
//! ==============
//! Component operations return these errors to their caller. The
//! orchestrator in `boot` is the only place that turns them into log lines;
//! nothing here is allowed to escape and abort startup.

/// Failures raised by the application host and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    /// A component was registered after the application was mounted.
    #[error("component registry is frozen after mount; cannot register `{name}`")]
    RegistryFrozen { name: String },

    /// `mount` or a plugin install was attempted on a mounted application.
    #[error("application already mounted on `{target}`")]
    AlreadyMounted { target: String },

    /// The mount selector did not match any element.
    #[error("mount target `{selector}` not found")]
    MountTargetMissing { selector: String },

    /// The mount selector is not valid CSS.
    #[error("mount selector `{selector}` is invalid: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// No browser window or document is reachable.
    #[error("no browser window available")]
    NoWindow,

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

/// Failures reported by external service initializers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Required configuration for the service is absent or malformed.
    #[error("{service} is not configured: {reason}")]
    NotConfigured { service: &'static str, reason: String },

    /// `init` was called a second time.
    #[error("{service} is already initialized")]
    AlreadyInitialized { service: &'static str },

    /// The host environment cannot provide the service.
    #[error("{service} is unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },
}

impl ServiceError {
    /// Name of the service that produced the error.
    #[must_use]
    pub fn service(&self) -> &'static str {
        match self {
            Self::NotConfigured { service, .. }
            | Self::AlreadyInitialized { service }
            | Self::Unavailable { service, .. } => service,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
