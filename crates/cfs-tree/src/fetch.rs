//! Object retrieval across the local and remote backends.

use std::sync::Arc;

use bytes::Bytes;
use cfs_store::{Backend, Directory, StoreError};
use cfs_types::{ContentHash, HashRef, RefKind};
use tracing::{debug, warn};

use crate::error::{FsError, FsResult};

/// An object fetched through a [`HashRef`], decoded according to its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Blob(Bytes),
    Dir(Directory),
}

/// Reads objects from the local backend, falling back to the remote one.
pub(crate) struct Fetcher {
    local: Arc<dyn Backend>,
    remote: Arc<dyn Backend>,
    verify_remote_reads: bool,
}

impl Fetcher {
    pub(crate) fn new(
        local: Arc<dyn Backend>,
        remote: Arc<dyn Backend>,
        verify_remote_reads: bool,
    ) -> Self {
        Self {
            local,
            remote,
            verify_remote_reads,
        }
    }

    pub(crate) fn local(&self) -> &Arc<dyn Backend> {
        &self.local
    }

    pub(crate) fn remote(&self) -> &Arc<dyn Backend> {
        &self.remote
    }

    /// Raw bytes stored under `hash`.
    ///
    /// Only a local `NotFound` falls through to the remote; any other local
    /// failure is returned as is. With verification on, remote bytes are
    /// written through to the local backend and must hash back to `hash`.
    pub(crate) async fn fetch_bytes(&self, hash: &ContentHash) -> FsResult<Bytes> {
        match self.local.get(hash).await {
            Ok(data) => return Ok(data),
            Err(StoreError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let data = self.remote.get(hash).await?;
        debug!(hash = %hash.short(), len = data.len(), "served from remote");

        if self.verify_remote_reads {
            let computed = self.local.set(data.clone()).await?;
            if &computed != hash {
                warn!(requested = %hash, computed = %computed, "backends disagree on content hash");
                return Err(FsError::InconsistentBackend {
                    requested: hash.clone(),
                    computed,
                });
            }
        }
        Ok(data)
    }

    pub(crate) async fn fetch(&self, target: &HashRef) -> FsResult<Resolved> {
        let data = self.fetch_bytes(target.hash()).await?;
        match target.kind() {
            RefKind::Blob => Ok(Resolved::Blob(data)),
            RefKind::Dir => Ok(Resolved::Dir(Directory::from_bytes(target.hash(), &data)?)),
        }
    }

    /// Fetch and decode a directory object.
    pub(crate) async fn fetch_dir(&self, hash: &ContentHash) -> FsResult<Directory> {
        let data = self.fetch_bytes(hash).await?;
        Ok(Directory::from_bytes(hash, &data)?)
    }
}
