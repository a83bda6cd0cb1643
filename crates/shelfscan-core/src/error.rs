//! Error types for Shelfscan Core
//!
//! Provides error handling for:
//! - Analysis calls (one undifferentiated failure)
//! - Configuration loading
//! - Profile loading

use std::path::PathBuf;

/// The single failure signal of an analysis call.
///
/// Transport errors, non-success responses, timeouts and malformed bodies all
/// collapse into this value. The reason is kept for diagnostics only; callers
/// see "could not analyze".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not analyze product {barcode}")]
pub struct AnalysisFailure {
    barcode: String,
    reason: String,
}

impl AnalysisFailure {
    /// Create new failure
    #[inline]
    #[must_use]
    pub fn new(barcode: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            reason: reason.into(),
        }
    }

    /// Barcode that was being analyzed
    #[inline]
    #[must_use]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Diagnostic reason, for logs
    #[inline]
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the config shape
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Profile loading errors
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Profile file could not be read
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile file content does not match the profile shape
    #[error("failed to parse profile {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
