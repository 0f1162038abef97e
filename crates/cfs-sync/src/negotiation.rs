use cfs_store::Backend;
use cfs_types::ContentHash;
use tracing::debug;

use crate::error::SyncResult;
use crate::types::Negotiation;

/// Object negotiation: decides which live objects the remote needs.
pub struct NegotiationEngine;

impl NegotiationEngine {
    /// Narrow `live` to what `remote` lacks.
    ///
    /// Remotes without the `missing` capability get everything.
    pub async fn negotiate(
        remote: &dyn Backend,
        live: Vec<ContentHash>,
    ) -> SyncResult<Negotiation> {
        if !remote.capabilities().missing {
            return Ok(Negotiation {
                to_send: live,
                already_present: 0,
                narrowed: false,
            });
        }

        let total = live.len();
        let to_send = remote.missing(&live).await?;
        debug!(total, missing = to_send.len(), "remote reported missing objects");
        Ok(Negotiation {
            already_present: total.saturating_sub(to_send.len()),
            to_send,
            narrowed: true,
        })
    }
}
