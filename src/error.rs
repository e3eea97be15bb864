//! Error types for the context gateway.

use std::path::PathBuf;

/// Configuration resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Gateway channel errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },
}

/// Errors raised by a session summary backend.
///
/// The in-memory store never produces these; they exist for backends that
/// talk to external storage.
#[derive(Debug, thiserror::Error)]
pub enum ContextStoreError {
    #[error("Summary backend failure: {reason}")]
    Backend { reason: String },
}
