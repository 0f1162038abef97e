use cfs_types::ContentHash;
use serde::{Deserialize, Serialize};

/// Outcome of asking the remote what it lacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Negotiation {
    /// Hashes that must be transferred.
    pub to_send: Vec<ContentHash>,
    /// Number of live hashes the remote already holds.
    pub already_present: usize,
    /// Whether the remote's `missing` capability was used.
    pub narrowed: bool,
}

/// Result of a push.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReport {
    /// Hashes transferred and verified, in transfer order.
    pub hashes: Vec<ContentHash>,
    /// Number of live hashes considered before narrowing.
    pub objects_considered: usize,
    pub bytes_transferred: u64,
    pub narrowed: bool,
}

impl PushReport {
    pub fn objects_sent(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_up_to_date(&self) -> bool {
        self.hashes.is_empty()
    }
}
