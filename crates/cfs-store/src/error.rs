use cfs_types::ContentHash;

use crate::traits::Capability;

/// Errors from backend operations.
#[derive(Clone, Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object is unknown to this backend.
    #[error("object not found: {0}")]
    NotFound(ContentHash),

    /// The backend does not offer the requested operation.
    #[error("backend does not support `{0}`")]
    Unsupported(Capability),

    /// A backend handed to a store lacks a capability the store requires.
    #[error("{backend} backend is missing required capability `{capability}`")]
    MissingCapability {
        backend: &'static str,
        capability: Capability,
    },

    /// A directory object could not be decoded.
    #[error("corrupt directory object {hash}: {reason}")]
    CorruptDirectory { hash: ContentHash, reason: String },

    /// Serialization failure while encoding an object.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Failure reported by the underlying storage or transport.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;
