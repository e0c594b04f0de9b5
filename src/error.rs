//! Typed errors for the provisioning engine.
//!
//! Configuration loading returns [`ConfigError`] so callers can distinguish a
//! fatal misconfiguration (unreadable or invalid TOML → non-zero exit) from
//! the recoverable per-entry conditions that resources report as outcomes.
//! Command handlers at the CLI boundary convert to [`anyhow::Error`] via `?`.

use thiserror::Error;

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML file contains a syntax or shape error that prevents parsing.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidToml { file: String, message: String },

    /// The provisioning root directory could not be determined.
    #[error("Cannot determine provisioning root: {0}")]
    RootNotFound(String),
}
