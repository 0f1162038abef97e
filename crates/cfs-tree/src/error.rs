use cfs_refs::RootError;
use cfs_store::StoreError;
use cfs_sync::SyncError;
use cfs_types::{ContentHash, TypeError};
use thiserror::Error;

/// Errors surfaced by [`ContentFs`](crate::ContentFs) operations.
///
/// `Clone` because a failed transaction reports the same error to every
/// write request folded into it.
#[derive(Clone, Debug, Error)]
pub enum FsError {
    /// The operation needs a root and none has been installed.
    #[error("root has not been set")]
    RootUnset,

    /// A path segment, or the blob a `get` expected, is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// `ls` reached a blob.
    #[error("not a directory: {0}")]
    NotDirectory(String),

    /// A write path without a leading `/`, or one that names no entry.
    #[error("path is not valid: {0}")]
    InvalidPath(String),

    /// An address that is neither a path nor a well-formed hash reference.
    #[error("invalid hash reference: {0}")]
    InvalidHashRef(String),

    /// The root moved between the start of a transaction and its commit.
    /// Nothing from the transaction was applied; the writes may be retried.
    #[error("conflict: root updated concurrently (expected {expected}, found {actual})")]
    Conflict { expected: String, actual: String },

    /// The local backend filed bytes served by the remote under another hash.
    #[error("inconsistent backends: remote object {requested} hashes to {computed} locally")]
    InconsistentBackend {
        requested: ContentHash,
        computed: ContentHash,
    },

    /// During push, the remote computed another hash for transferred bytes.
    #[error("remote hash does not match local hash: local {local}, remote {remote}")]
    HashMismatch {
        local: ContentHash,
        remote: ContentHash,
    },

    /// A root that is not a directory was offered to `set_root`.
    #[error("root error: {0}")]
    Root(RootError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No Tokio runtime was available to start the write queue.
    #[error("no async runtime: {0}")]
    NoRuntime(String),

    /// The write queue worker has stopped.
    #[error("write queue closed")]
    QueueClosed,
}

impl From<RootError> for FsError {
    fn from(err: RootError) -> Self {
        match err {
            RootError::RootMismatch { expected, actual } => Self::Conflict { expected, actual },
            other => Self::Root(other),
        }
    }
}

impl From<SyncError> for FsError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::HashMismatch { local, remote } => Self::HashMismatch { local, remote },
            SyncError::Store(e) => Self::Store(e),
        }
    }
}

impl From<TypeError> for FsError {
    fn from(err: TypeError) -> Self {
        Self::InvalidHashRef(err.to_string())
    }
}

pub type FsResult<T> = Result<T, FsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use cfs_types::HashRef;

    fn hash(h: &str) -> ContentHash {
        ContentHash::new(h).unwrap()
    }

    #[test]
    fn root_mismatch_becomes_conflict() {
        let err: FsError = RootError::RootMismatch {
            expected: "a.dir".into(),
            actual: "b.dir".into(),
        }
        .into();
        assert!(matches!(err, FsError::Conflict { .. }));
    }

    #[test]
    fn root_not_directory_is_kept() {
        let err: FsError = RootError::NotDirectory(HashRef::blob(hash("aa"))).into();
        assert!(matches!(err, FsError::Root(RootError::NotDirectory(_))));
    }

    #[test]
    fn sync_mismatch_is_flattened() {
        let err: FsError = SyncError::HashMismatch {
            local: hash("aa"),
            remote: hash("bb"),
        }
        .into();
        assert!(matches!(err, FsError::HashMismatch { .. }));
    }

    #[test]
    fn type_error_is_invalid_hash_ref() {
        let err: FsError = TypeError::EmptyHash.into();
        assert!(matches!(err, FsError::InvalidHashRef(_)));
    }
}
