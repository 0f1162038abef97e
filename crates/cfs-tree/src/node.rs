//! The working tree a transaction mutates.
//!
//! Entries start out as unexpanded references copied from a stored
//! [`Directory`] and are expanded in place when a write passes through them.
//! Hashing consumes the tree bottom-up and yields the new directory reference.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use cfs_store::{Backend, Directory};
use cfs_types::{ContentHash, HashRef, RefKind};
use tracing::debug;

use crate::error::FsResult;
use crate::fetch::Fetcher;

/// A directory entry in a working tree.
#[derive(Debug)]
pub(crate) enum Node {
    Blob(ContentHash),
    DirRef(ContentHash),
    Expanded(WorkingDir),
}

impl From<HashRef> for Node {
    fn from(target: HashRef) -> Self {
        match target.kind() {
            RefKind::Blob => Self::Blob(target.into_hash()),
            RefKind::Dir => Self::DirRef(target.into_hash()),
        }
    }
}

/// A mutable, partially expanded directory.
#[derive(Debug, Default)]
pub(crate) struct WorkingDir {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
}

impl From<Directory> for WorkingDir {
    fn from(dir: Directory) -> Self {
        let mut tree = Self::default();
        for (name, target) in dir.iter() {
            tree.push(name.to_string(), Node::from(target.clone()));
        }
        tree
    }
}

type StoreFuture<'a> = Pin<Box<dyn Future<Output = FsResult<HashRef>> + Send + 'a>>;
type WriteFuture<'a> = Pin<Box<dyn Future<Output = FsResult<()>> + Send + 'a>>;

impl WorkingDir {
    fn push(&mut self, name: String, node: Node) -> usize {
        let idx = self.entries.len();
        self.index.insert(name.clone(), idx);
        self.entries.push((name, node));
        idx
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Link `hash` as the file `name` under the directory chain `parents`.
    ///
    /// Missing directories are created. A directory reference on the way is
    /// fetched and expanded. A blob on the way is replaced by an empty
    /// directory and its content dropped from the tree. An entry is only
    /// expanded once the write beneath it has succeeded.
    pub(crate) fn write<'a>(
        &'a mut self,
        parents: &'a [&'a str],
        name: &'a str,
        hash: ContentHash,
        fetcher: &'a Fetcher,
    ) -> WriteFuture<'a> {
        Box::pin(async move {
            let Some((first, rest)) = parents.split_first() else {
                self.set_blob(name, hash);
                return Ok(());
            };

            let idx = match self.index.get(*first) {
                Some(&idx) => idx,
                None => self.push(first.to_string(), Node::Expanded(WorkingDir::default())),
            };
            let slot = &mut self.entries[idx].1;
            match slot {
                Node::Expanded(child) => child.write(rest, name, hash, fetcher).await,
                Node::DirRef(stored) => {
                    let mut child = WorkingDir::from(fetcher.fetch_dir(stored).await?);
                    child.write(rest, name, hash, fetcher).await?;
                    *slot = Node::Expanded(child);
                    Ok(())
                }
                Node::Blob(replaced) => {
                    debug!(name = *first, replaced = %replaced.short(), "file replaced by directory");
                    let mut child = WorkingDir::default();
                    child.write(rest, name, hash, fetcher).await?;
                    *slot = Node::Expanded(child);
                    Ok(())
                }
            }
        })
    }

    /// Point `name` at a blob, replacing whatever was there.
    pub(crate) fn set_blob(&mut self, name: &str, hash: ContentHash) {
        match self.index.get(name) {
            Some(&idx) => self.entries[idx].1 = Node::Blob(hash),
            None => {
                self.push(name.to_string(), Node::Blob(hash));
            }
        }
    }

    /// Serialize and store this directory, children first.
    ///
    /// Unexpanded references are written back as they were; only expanded
    /// subdirectories are re-hashed.
    pub(crate) fn store(self, local: &dyn Backend) -> StoreFuture<'_> {
        Box::pin(async move {
            let mut dir = Directory::new();
            for (name, node) in self.entries {
                let target = match node {
                    Node::Blob(hash) => HashRef::blob(hash),
                    Node::DirRef(hash) => HashRef::dir(hash),
                    Node::Expanded(child) => child.store(local).await?,
                };
                dir.insert(name, target);
            }
            let hash = local.set(dir.to_bytes()?).await?;
            Ok(HashRef::dir(hash))
        })
    }
}
