//! The [`ContentFs`] facade.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use cfs_refs::{InMemoryRootStore, RootStore};
use cfs_store::{Backend, Capability, Directory};
use cfs_sync::{PushEngine, PushReport};
use cfs_types::{ContentHash, HashRef};
use tracing::{debug, info};

use crate::config::FsConfig;
use crate::error::FsResult;
use crate::fetch::Fetcher;
use crate::path::write_segments;
use crate::queue::{QueueStats, WriteQueue};
use crate::resolve;
use crate::txn::Transaction;
use crate::walk;

/// State shared by a store's handles and its write-queue worker.
pub(crate) struct StoreContext {
    pub(crate) fetcher: Fetcher,
    pub(crate) roots: Arc<dyn RootStore>,
    pub(crate) config: FsConfig,
}

impl StoreContext {
    pub(crate) fn current_root(&self) -> FsResult<Option<HashRef>> {
        Ok(self.roots.get_root()?)
    }
}

/// A content-addressed filesystem over a local and a remote backend.
///
/// Handles are cheap to clone and share one write queue. Writes made through
/// [`set`](Self::set) and [`set_multi`](Self::set_multi) are serialized by
/// that queue; writes that overlap are committed together.
///
/// A store must be created inside a Tokio runtime, which runs the queue's
/// worker task.
#[derive(Clone)]
pub struct ContentFs {
    ctx: Arc<StoreContext>,
    queue: WriteQueue,
}

/// Builder for a [`ContentFs`] with a custom root store or configuration.
pub struct ContentFsBuilder {
    local: Arc<dyn Backend>,
    remote: Arc<dyn Backend>,
    roots: Option<Arc<dyn RootStore>>,
    config: FsConfig,
}

impl ContentFsBuilder {
    pub fn config(mut self, config: FsConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep the root pointer in `roots`. Stores sharing a root store act as
    /// independent writers on one tree.
    pub fn root_store(mut self, roots: Arc<dyn RootStore>) -> Self {
        self.roots = Some(roots);
        self
    }

    /// Check backend capabilities and start the write queue.
    pub fn build(self) -> FsResult<ContentFs> {
        let required = [Capability::Get, Capability::Set];
        self.local.capabilities().require("local", &required)?;
        self.remote.capabilities().require("remote", &required)?;

        let ctx = Arc::new(StoreContext {
            fetcher: Fetcher::new(self.local, self.remote, self.config.verify_remote_reads),
            roots: self
                .roots
                .unwrap_or_else(|| Arc::new(InMemoryRootStore::new())),
            config: self.config,
        });
        let queue = WriteQueue::start(Arc::clone(&ctx))?;
        debug!(config = ?ctx.config, "content store ready");
        Ok(ContentFs { ctx, queue })
    }
}

impl ContentFs {
    /// Create a store with default configuration and a fresh, unset root.
    pub fn new(local: Arc<dyn Backend>, remote: Arc<dyn Backend>) -> FsResult<Self> {
        Self::builder(local, remote).build()
    }

    pub fn builder(local: Arc<dyn Backend>, remote: Arc<dyn Backend>) -> ContentFsBuilder {
        ContentFsBuilder {
            local,
            remote,
            roots: None,
            config: FsConfig::default(),
        }
    }

    // ---- Reads ----

    /// Read the file at `path`, or the raw object named by a hash reference.
    pub async fn get(&self, path: &str) -> FsResult<Bytes> {
        resolve::get(&self.ctx, path).await
    }

    /// Entry names of the directory at `path`, in insertion order.
    pub async fn ls(&self, path: &str) -> FsResult<Vec<String>> {
        Ok(self.ls_raw(path).await?.names())
    }

    /// The stored listing of the directory at `path`.
    pub async fn ls_raw(&self, path: &str) -> FsResult<Directory> {
        resolve::ls_raw(&self.ctx, path).await
    }

    // ---- Writes ----

    /// Write `content` at `path` and return the root that includes it.
    pub async fn set(&self, path: &str, content: impl Into<Bytes>) -> FsResult<HashRef> {
        write_segments(path)?;
        self.queue
            .submit(vec![(path.to_string(), content.into())])
            .await
    }

    /// Write a batch in order within a single transaction.
    ///
    /// Every path is validated before anything is queued.
    pub async fn set_multi<I, P, C>(&self, writes: I) -> FsResult<HashRef>
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<Bytes>,
    {
        let writes: Vec<(String, Bytes)> = writes
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        for (path, _) in &writes {
            write_segments(path)?;
        }
        self.queue.submit(writes).await
    }

    /// Start a transaction outside the write queue.
    pub async fn transaction(&self) -> FsResult<Transaction<'_>> {
        Transaction::begin(&self.ctx).await
    }

    // ---- Root ----

    pub fn get_root(&self) -> FsResult<Option<HashRef>> {
        self.ctx.current_root()
    }

    /// Install `root` if the current root equals `expected`.
    pub fn set_root(&self, root: &HashRef, expected: Option<&HashRef>) -> FsResult<()> {
        self.ctx.roots.set_root(root, expected)?;
        info!(root = %root, "root installed");
        Ok(())
    }

    // ---- Reachability and sync ----

    /// Hashes of every object reachable from `root`, or from the current root.
    pub async fn active_hashes(&self, root: Option<&HashRef>) -> FsResult<BTreeSet<ContentHash>> {
        walk::active_hashes(&self.ctx, root).await
    }

    /// Copy every object reachable from `root` (or the current root) to the
    /// remote backend.
    pub async fn push(&self, root: Option<&HashRef>) -> FsResult<PushReport> {
        let live = self.active_hashes(root).await?;
        let report = PushEngine::push(
            self.ctx.fetcher.local().as_ref(),
            self.ctx.fetcher.remote().as_ref(),
            live.into_iter().collect(),
        )
        .await?;
        Ok(report)
    }

    // ---- Accessors ----

    pub fn local(&self) -> &Arc<dyn Backend> {
        self.ctx.fetcher.local()
    }

    pub fn remote(&self) -> &Arc<dyn Backend> {
        self.ctx.fetcher.remote()
    }

    pub fn config(&self) -> &FsConfig {
        &self.ctx.config
    }

    pub fn stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

impl fmt::Debug for ContentFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentFs")
            .field("root", &self.ctx.roots.get_root().ok().flatten())
            .field("config", &self.ctx.config)
            .field("stats", &self.stats())
            .finish()
    }
}
