//! Reachability: every object hash live under a root.

use std::collections::{BTreeSet, HashSet};

use cfs_types::{ContentHash, HashRef};
use tracing::debug;

use crate::error::FsResult;
use crate::fetch::Fetcher;
use crate::fs::StoreContext;

/// Hashes of the root, every directory below it, and every blob they link.
///
/// With no explicit `root` the current root is used, and the walk restarts
/// until the root is the same before and after it.
pub(crate) async fn active_hashes(
    ctx: &StoreContext,
    root: Option<&HashRef>,
) -> FsResult<BTreeSet<ContentHash>> {
    if let Some(root) = root {
        return reachable(&ctx.fetcher, Some(root)).await;
    }

    let mut restarts = 0u32;
    loop {
        let before = ctx.current_root()?;
        let live = reachable(&ctx.fetcher, before.as_ref()).await?;
        let after = ctx.current_root()?;
        if before == after {
            debug!(objects = live.len(), restarts, "reachability walk complete");
            return Ok(live);
        }
        restarts += 1;
        debug!(restarts, "root moved during walk, restarting");
    }
}

async fn reachable(fetcher: &Fetcher, root: Option<&HashRef>) -> FsResult<BTreeSet<ContentHash>> {
    let mut live = BTreeSet::new();
    let Some(root) = root else {
        return Ok(live);
    };

    let mut visited: HashSet<HashRef> = HashSet::new();
    let mut stack = vec![root.clone()];
    while let Some(target) = stack.pop() {
        if !visited.insert(target.clone()) {
            continue;
        }
        live.insert(target.hash().clone());
        if target.is_dir() {
            let dir = fetcher.fetch_dir(target.hash()).await?;
            stack.extend(dir.iter().map(|(_, child)| child.clone()));
        }
    }
    Ok(live)
}

#[cfg(test)]
mod tests {
    use crate::fs::ContentFs;
    use crate::FsError;
    use cfs_store::{Backend, InMemoryBackend, StoreError};
    use std::sync::Arc;

    fn store() -> (ContentFs, Arc<InMemoryBackend>) {
        let local = Arc::new(InMemoryBackend::new());
        let fs = ContentFs::new(local.clone(), Arc::new(InMemoryBackend::new())).unwrap();
        (fs, local)
    }

    #[tokio::test]
    async fn unset_root_is_empty() {
        let (fs, _) = store();
        assert!(fs.active_hashes(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn covers_every_object_written() {
        let (fs, local) = store();
        fs.set("/a/b/c.txt", "c").await.unwrap();
        fs.set("/a/d.txt", "d").await.unwrap();
        fs.set("/e.txt", "e").await.unwrap();

        let live = fs.active_hashes(None).await.unwrap();
        // root, /a, /a/b, three blobs
        assert_eq!(live.len(), 6);
        let root = fs.get_root().unwrap().unwrap();
        assert!(live.contains(root.hash()));
        for data in [&b"c"[..], b"d", b"e"] {
            let hash = local.set(bytes::Bytes::copy_from_slice(data)).await.unwrap();
            assert!(live.contains(&hash));
        }
    }

    #[tokio::test]
    async fn shared_content_counted_once() {
        let (fs, _) = store();
        fs.set_multi(vec![("/x/same", "dup"), ("/y/same", "dup")])
            .await
            .unwrap();
        // root plus one directory object for the identical /x and /y plus one blob
        assert_eq!(fs.active_hashes(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn explicit_root_walks_history() {
        let (fs, _) = store();
        let old = fs.set("/f", "old").await.unwrap();
        fs.set("/f", "new").await.unwrap();

        let then = fs.active_hashes(Some(&old)).await.unwrap();
        let now = fs.active_hashes(None).await.unwrap();
        assert!(then.contains(old.hash()));
        assert!(!now.contains(old.hash()));
    }

    #[tokio::test]
    async fn missing_directory_object_fails() {
        let (fs, local) = store();
        fs.set("/a/b", "b").await.unwrap();
        let root = fs.get_root().unwrap().unwrap();
        let a = fs.ls_raw("/").await.unwrap().get("a").unwrap().clone();
        local.remove(a.hash());

        let err = fs.active_hashes(Some(&root)).await.unwrap_err();
        assert!(matches!(err, FsError::Store(StoreError::NotFound(_))));
    }
}
