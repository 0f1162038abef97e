//! Error types for root pointer operations.

use cfs_types::HashRef;
use thiserror::Error;

/// Errors that can occur while reading or swapping the root pointer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RootError {
    /// Only directory references can become the root.
    #[error("cannot set root to non-directory: {0}")]
    NotDirectory(HashRef),

    /// The root moved since the caller last read it.
    #[error("root does not match: expected {expected}, found {actual}")]
    RootMismatch { expected: String, actual: String },

    /// The underlying root storage failed.
    #[error("root storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for root operations.
pub type RootResult<T> = std::result::Result<T, RootError>;

/// Human-readable form of an optional root, `<unset>` when absent.
pub fn describe(root: Option<&HashRef>) -> String {
    root.map(ToString::to_string)
        .unwrap_or_else(|| "<unset>".to_string())
}
