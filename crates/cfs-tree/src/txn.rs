//! Optimistic tree transactions.
//!
//! A [`Transaction`] reads the root once, applies an ordered batch of writes
//! to a private working copy, and installs the re-hashed tree only if the
//! root is still the one it started from. A transaction that lost the race
//! fails with [`FsError::Conflict`] and leaves the root untouched.

use bytes::Bytes;
use cfs_refs::describe;
use cfs_types::HashRef;
use tracing::{debug, info};

use crate::error::{FsError, FsResult};
use crate::fs::StoreContext;
use crate::node::WorkingDir;
use crate::path::write_segments;

/// An in-progress batch of writes against a snapshot of the root.
///
/// Obtained from [`ContentFs::transaction`](crate::ContentFs::transaction).
/// Transactions bypass the write queue, so two of them may race; exactly one
/// of the racers commits.
pub struct Transaction<'a> {
    ctx: &'a StoreContext,
    base: Option<HashRef>,
    tree: WorkingDir,
    writes: usize,
}

impl<'a> Transaction<'a> {
    pub(crate) async fn begin(ctx: &'a StoreContext) -> FsResult<Self> {
        let base = ctx.current_root()?;
        let tree = match &base {
            Some(root) => WorkingDir::from(ctx.fetcher.fetch_dir(root.hash()).await?),
            None => WorkingDir::default(),
        };
        debug!(base = %describe(base.as_ref()), "transaction started");
        Ok(Self {
            ctx,
            base,
            tree,
            writes: 0,
        })
    }

    /// The root this transaction started from.
    pub fn base(&self) -> Option<&HashRef> {
        self.base.as_ref()
    }

    /// Number of writes applied so far.
    pub fn len(&self) -> usize {
        self.writes
    }

    pub fn is_empty(&self) -> bool {
        self.writes == 0
    }

    /// Store `content` locally and link it at `path` in the working tree.
    ///
    /// Missing intermediate directories are created. An intermediate segment
    /// that currently names a file is turned into an empty directory.
    pub async fn apply(&mut self, path: &str, content: Bytes) -> FsResult<()> {
        let segs = write_segments(path)?;
        let Some((name, parents)) = segs.split_last() else {
            return Err(FsError::InvalidPath(path.to_string()));
        };

        let hash = self.ctx.fetcher.local().set(content).await?;

        self.tree
            .write(parents, name, hash, &self.ctx.fetcher)
            .await?;
        self.writes += 1;
        Ok(())
    }

    /// Hash the working tree and swap it in as the new root.
    pub async fn commit(self) -> FsResult<HashRef> {
        let current = self.ctx.current_root()?;
        if current != self.base {
            return Err(FsError::Conflict {
                expected: describe(self.base.as_ref()),
                actual: describe(current.as_ref()),
            });
        }

        let root = self.tree.store(self.ctx.fetcher.local().as_ref()).await?;
        self.ctx.roots.set_root(&root, self.base.as_ref())?;
        info!(root = %root, writes = self.writes, "transaction committed");
        Ok(root)
    }
}
