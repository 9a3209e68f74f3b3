//! Error types for Descry operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used
//! across all Descry crates. Uses `thiserror` for derive macros.
//!
//! Discovery-time failures (unreadable or malformed plugin manifests) are
//! deliberately *not* surfaced through this type to callers of the scan:
//! the discovery engine logs them and continues. The [`Error::Manifest`]
//! variant exists for the manifest loader itself, so the engine has
//! something structured to log.

use thiserror::Error;

/// Errors that can occur in Descry operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (bad schema declaration, undeclared override key,
    /// invalid parameter value).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin registration error (duplicate name, reserved family name).
    #[error("Registry error: {0}")]
    Registry(String),

    /// A plugin manifest could not be read or parsed.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// A factory failed to construct an instance from a merged
    /// configuration.
    #[error("Construction error: {0}")]
    Construction(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a registry error.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Create a manifest error.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Create a construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }
}

/// Result type alias using Descry's Error type.
pub type Result<T> = std::result::Result<T, Error>;
