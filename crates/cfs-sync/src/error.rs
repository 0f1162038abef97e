use cfs_types::ContentHash;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum SyncError {
    #[error("remote hash does not match local hash: local {local}, remote {remote}")]
    HashMismatch {
        local: ContentHash,
        remote: ContentHash,
    },

    #[error("store error: {0}")]
    Store(#[from] cfs_store::StoreError),
}

pub type SyncResult<T> = Result<T, SyncError>;
