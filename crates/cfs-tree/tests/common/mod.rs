#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use cfs_store::{Backend, Capabilities, InMemoryBackend, StoreResult};
use cfs_tree::{ContentFs, ContentHash};
use tokio::sync::Notify;

pub fn mem() -> Arc<InMemoryBackend> {
    Arc::new(InMemoryBackend::new())
}

pub fn store() -> ContentFs {
    ContentFs::new(mem(), mem()).unwrap()
}

/// A small project tree:
///
/// ```text
/// /README.md
/// /deep/test.txt
/// /deep/_1/_2/test.txt
/// /src/main.rs
/// ```
pub async fn seeded(fs: &ContentFs) {
    fs.set_multi(vec![
        ("/README.md", "# readme"),
        ("/deep/test.txt", "top"),
        ("/deep/_1/_2/test.txt", "test"),
        ("/src/main.rs", "fn main() {}"),
    ])
    .await
    .unwrap();
}

/// An in-memory backend whose next `get` can be held until released.
///
/// Used to park one side of a race at a known suspension point.
pub struct GatedBackend {
    inner: InMemoryBackend,
    armed: AtomicBool,
    reached: Notify,
    release: Notify,
}

impl GatedBackend {
    pub fn new() -> Self {
        Self {
            inner: InMemoryBackend::new(),
            armed: AtomicBool::new(false),
            reached: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Hold the next `get` until [`release`](Self::release).
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Wait until a `get` is being held.
    pub async fn reached(&self) {
        self.reached.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    pub fn inner(&self) -> &InMemoryBackend {
        &self.inner
    }
}

#[async_trait]
impl Backend for GatedBackend {
    fn capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }

    async fn get(&self, hash: &ContentHash) -> StoreResult<Bytes> {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        self.inner.get(hash).await
    }

    async fn set(&self, data: Bytes) -> StoreResult<ContentHash> {
        self.inner.set(data).await
    }

    async fn missing(&self, hashes: &[ContentHash]) -> StoreResult<Vec<ContentHash>> {
        self.inner.missing(hashes).await
    }
}
