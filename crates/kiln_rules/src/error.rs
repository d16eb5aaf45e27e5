//! Error types for rule generation.

use std::path::PathBuf;

/// Errors that can occur while discovering sources or registering rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The source directory (or one of its entries) could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Two sources share a stem and would produce the same object file.
    #[error("sources {first} and {second} both produce object '{stem}.o'")]
    StemCollision {
        /// The shared file stem.
        stem: String,
        /// The source registered first.
        first: PathBuf,
        /// The conflicting source.
        second: PathBuf,
    },

    /// A rule for this output was already registered.
    #[error("duplicate rule for output '{0}'")]
    DuplicateOutput(String),

    /// The rule set could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}
