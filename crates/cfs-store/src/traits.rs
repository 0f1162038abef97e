use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cfs_types::ContentHash;

use crate::error::{StoreError, StoreResult};

/// A single backend operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Get,
    Set,
    Missing,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Set => write!(f, "set"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// The operations a backend actually offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub get: bool,
    pub set: bool,
    pub missing: bool,
}

impl Capabilities {
    /// `get` and `set` only.
    pub const READ_WRITE: Self = Self {
        get: true,
        set: true,
        missing: false,
    };

    /// `get`, `set`, and `missing`.
    pub const FULL: Self = Self {
        get: true,
        set: true,
        missing: true,
    };

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Get => self.get,
            Capability::Set => self.set,
            Capability::Missing => self.missing,
        }
    }

    /// Fail with [`StoreError::MissingCapability`] unless every capability in
    /// `required` is offered. `backend` names the role in the error message.
    pub fn require(&self, backend: &'static str, required: &[Capability]) -> StoreResult<()> {
        match required.iter().find(|cap| !self.supports(**cap)) {
            Some(capability) => Err(StoreError::MissingCapability {
                backend,
                capability: *capability,
            }),
            None => Ok(()),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::READ_WRITE
    }
}

/// Content-addressed key/value backend.
///
/// All implementations must satisfy these invariants:
/// - `set` is deterministic and idempotent: equal bytes yield equal hashes.
/// - `get` fails with [`StoreError::NotFound`] for hashes it does not hold.
/// - The backend never interprets object contents.
/// - Operations not listed in [`capabilities`](Backend::capabilities) fail
///   with [`StoreError::Unsupported`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Operations this backend offers. Checked once when a store is built.
    fn capabilities(&self) -> Capabilities {
        Capabilities::READ_WRITE
    }

    /// Read the bytes stored under `hash`.
    async fn get(&self, hash: &ContentHash) -> StoreResult<Bytes>;

    /// Store `data` and return the hash this backend computed for it.
    async fn set(&self, data: Bytes) -> StoreResult<ContentHash>;

    /// Return the subset of `hashes` this backend does not hold.
    async fn missing(&self, _hashes: &[ContentHash]) -> StoreResult<Vec<ContentHash>> {
        Err(StoreError::Unsupported(Capability::Missing))
    }
}

#[async_trait]
impl<T: Backend + ?Sized> Backend for Arc<T> {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    async fn get(&self, hash: &ContentHash) -> StoreResult<Bytes> {
        (**self).get(hash).await
    }

    async fn set(&self, data: Bytes) -> StoreResult<ContentHash> {
        (**self).set(data).await
    }

    async fn missing(&self, hashes: &[ContentHash]) -> StoreResult<Vec<ContentHash>> {
        (**self).missing(hashes).await
    }
}
