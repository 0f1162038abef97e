use cfs_store::Backend;
use cfs_types::ContentHash;
use tracing::{debug, info};

use crate::error::SyncResult;
use crate::negotiation::NegotiationEngine;
use crate::types::PushReport;
use crate::verifier::TransferVerifier;

/// Copies live objects from a local backend to a remote backend.
pub struct PushEngine;

impl PushEngine {
    /// Push every object in `live` that the remote needs.
    ///
    /// Each object is read from `local`, written to `remote`, and the hash the
    /// remote returns is checked against the local hash. The first mismatch
    /// aborts the push with [`SyncError::HashMismatch`](crate::SyncError::HashMismatch).
    pub async fn push(
        local: &dyn Backend,
        remote: &dyn Backend,
        live: Vec<ContentHash>,
    ) -> SyncResult<PushReport> {
        let objects_considered = live.len();
        let negotiation = NegotiationEngine::negotiate(remote, live).await?;

        let mut bytes_transferred = 0u64;
        for hash in &negotiation.to_send {
            let data = local.get(hash).await?;
            let len = data.len() as u64;
            let remote_hash = remote.set(data).await?;
            TransferVerifier::verify(hash, &remote_hash)?;
            debug!(hash = %hash.short(), len, "object pushed");
            bytes_transferred += len;
        }

        info!(
            considered = objects_considered,
            sent = negotiation.to_send.len(),
            bytes = bytes_transferred,
            "push complete"
        );

        Ok(PushReport {
            hashes: negotiation.to_send,
            objects_considered,
            bytes_transferred,
            narrowed: negotiation.narrowed,
        })
    }
}
