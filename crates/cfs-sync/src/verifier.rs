use cfs_types::ContentHash;

use crate::error::{SyncError, SyncResult};

/// Checks that a remote stored transferred bytes under the hash we expect.
pub struct TransferVerifier;

impl TransferVerifier {
    /// Compare the local hash of an object with the hash the remote computed
    /// for the same bytes.
    pub fn verify(local: &ContentHash, remote: &ContentHash) -> SyncResult<()> {
        if local == remote {
            Ok(())
        } else {
            Err(SyncError::HashMismatch {
                local: local.clone(),
                remote: remote.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(h: &str) -> ContentHash {
        ContentHash::new(h).unwrap()
    }

    #[test]
    fn equal_hashes_pass() {
        assert!(TransferVerifier::verify(&hash("aa"), &hash("aa")).is_ok());
    }

    #[test]
    fn different_hashes_fail() {
        let err = TransferVerifier::verify(&hash("aa"), &hash("bb")).unwrap_err();
        match err {
            SyncError::HashMismatch { local, remote } => {
                assert_eq!(local, hash("aa"));
                assert_eq!(remote, hash("bb"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
