/*!
 * Error types for the tangocho application.
 *
 * This module contains the user-facing error taxonomy, using the thiserror
 * crate for ergonomic error definitions. Anything else (I/O surprises,
 * programming defects) travels as a plain anyhow error and is reported with
 * its full context chain.
 */

use thiserror::Error;

/// Failures caused by the user's environment or input. The CLI reports
/// these as a single `ERROR: ...` line without a backtrace.
#[derive(Error, Debug)]
pub enum AppError {
    /// Expected input files (or the cache fallback) are absent
    #[error("{0}")]
    NotFound(String),

    /// Input data is malformed: vendor export structure, sheet columns,
    /// timestamps, or a corrupt cache file
    #[error("{0}")]
    Format(String),

    /// Invalid configuration values or overrides
    #[error("{0}")]
    Config(String),
}

impl AppError {
    /// Build a NotFound error from anything displayable
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Build a Format error from anything displayable
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Build a Config error from anything displayable
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
