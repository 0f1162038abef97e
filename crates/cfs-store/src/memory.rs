use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use cfs_crypto::ContentHasher;
use cfs_types::ContentHash;
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::{Backend, Capabilities, Capability};

/// In-memory, HashMap-based backend.
///
/// Intended for tests and embedding. Objects are held in memory behind a
/// `RwLock`. Hashes are computed with the configured [`ContentHasher`]; two
/// backends built with different hashers disagree on every hash.
pub struct InMemoryBackend {
    objects: RwLock<HashMap<ContentHash, Bytes>>,
    hasher: ContentHasher,
    capabilities: Capabilities,
}

impl InMemoryBackend {
    /// Create an empty backend offering `get`, `set`, and `missing`.
    pub fn new() -> Self {
        Self::with_hasher(ContentHasher::OBJECT)
    }

    /// Create an empty backend hashing with `hasher`.
    pub fn with_hasher(hasher: ContentHasher) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            hasher,
            capabilities: Capabilities::FULL,
        }
    }

    /// Restrict the operations this backend advertises and serves.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the backend is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Returns `true` if an object is stored under `hash`.
    pub fn contains(&self, hash: &ContentHash) -> bool {
        self.objects.read().expect("lock poisoned").contains_key(hash)
    }

    fn check(&self, capability: Capability) -> StoreResult<()> {
        if self.capabilities.supports(capability) {
            Ok(())
        } else {
            Err(StoreError::Unsupported(capability))
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn get(&self, hash: &ContentHash) -> StoreResult<Bytes> {
        self.check(Capability::Get)?;
        let map = self.objects.read().expect("lock poisoned");
        map.get(hash)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(hash.clone()))
    }

    async fn set(&self, data: Bytes) -> StoreResult<ContentHash> {
        self.check(Capability::Set)?;
        let hash = self.hasher.hash(&data);
        trace!(hash = %hash.short(), len = data.len(), "stored object");
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry(hash.clone()).or_insert(data);
        Ok(hash)
    }

    async fn missing(&self, hashes: &[ContentHash]) -> StoreResult<Vec<ContentHash>> {
        self.check(Capability::Missing)?;
        let map = self.objects.read().expect("lock poisoned");
        Ok(hashes
            .iter()
            .filter(|h| !map.contains_key(*h))
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("object_count", &self.len())
            .field("domain", &self.hasher.domain())
            .finish()
    }
}
