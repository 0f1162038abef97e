use serde::{Deserialize, Serialize};

/// Configuration for a [`ContentFs`](crate::ContentFs).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FsConfig {
    /// Write objects served by the remote through to the local backend and
    /// check that the local backend files them under the same hash.
    pub verify_remote_reads: bool,
    /// Upper bound on queued write requests folded into one transaction.
    pub max_coalesced_requests: usize,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            verify_remote_reads: true,
            max_coalesced_requests: 1024,
        }
    }
}
