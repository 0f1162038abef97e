mod common;

use std::sync::Arc;

use bytes::Bytes;
use cfs_refs::{InMemoryRootStore, RootStore};
use cfs_tree::{ContentFs, FsError};
use common::{mem, GatedBackend};

fn writer(local: &Arc<GatedBackend>, roots: &Arc<InMemoryRootStore>) -> ContentFs {
    ContentFs::builder(local.clone(), mem())
        .root_store(roots.clone())
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Conflicts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn racing_writers_on_shared_root_one_wins() {
    let local = Arc::new(GatedBackend::new());
    let roots = Arc::new(InMemoryRootStore::new());
    let a = writer(&local, &roots);
    let b = writer(&local, &roots);
    a.set("/seed", "0").await.unwrap();
    let base = roots.get_root().unwrap();

    // Park a's transaction while it loads the base tree.
    local.arm();
    let slow = tokio::spawn({
        let a = a.clone();
        async move { a.set("/from-a", "a").await }
    });
    local.reached().await;

    let winner = b.set("/from-b", "b").await.unwrap();
    local.release();

    let err = slow.await.unwrap().unwrap_err();
    assert!(matches!(err, FsError::Conflict { .. }));
    assert_ne!(roots.get_root().unwrap(), base);
    assert_eq!(roots.get_root().unwrap(), Some(winner));
    assert_eq!(&b.get("/from-b").await.unwrap()[..], b"b");
    assert!(matches!(b.get("/from-a").await, Err(FsError::NotFound(_))));
    assert_eq!(a.stats().failed, 1);
}

#[tokio::test]
async fn conflicting_writer_can_retry() {
    let local = Arc::new(GatedBackend::new());
    let roots = Arc::new(InMemoryRootStore::new());
    let a = writer(&local, &roots);
    let b = writer(&local, &roots);
    a.set("/seed", "0").await.unwrap();

    local.arm();
    let slow = tokio::spawn({
        let a = a.clone();
        async move { a.set("/from-a", "a").await }
    });
    local.reached().await;
    b.set("/from-b", "b").await.unwrap();
    local.release();
    assert!(matches!(slow.await.unwrap(), Err(FsError::Conflict { .. })));

    a.set("/from-a", "a").await.unwrap();
    assert_eq!(a.ls("/").await.unwrap(), vec!["seed", "from-b", "from-a"]);
}

#[tokio::test]
async fn transactions_from_same_base_conflict() {
    let fs = common::store();
    fs.set("/seed", "0").await.unwrap();

    let mut one = fs.transaction().await.unwrap();
    let mut two = fs.transaction().await.unwrap();
    assert_eq!(one.base(), two.base());
    one.apply("/one", Bytes::from_static(b"1")).await.unwrap();
    two.apply("/two", Bytes::from_static(b"2")).await.unwrap();

    let results = [one.commit().await, two.commit().await];
    let committed = results.iter().filter(|r| r.is_ok()).count();
    let conflicted = results
        .iter()
        .filter(|r| matches!(r, Err(FsError::Conflict { .. })))
        .count();
    assert_eq!((committed, conflicted), (1, 1));
}

#[tokio::test]
async fn queued_writers_never_conflict() {
    let fs = common::store();
    let mut handles = Vec::new();
    for i in 0..16 {
        let fs = fs.clone();
        handles.push(tokio::spawn(async move {
            fs.set(&format!("/n/{i}"), format!("{i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(fs.ls("/n").await.unwrap().len(), 16);
    let stats = fs.stats();
    assert_eq!(stats.requests, 16);
    assert_eq!(stats.writes, 16);
    assert_eq!(stats.failed, 0);
}

// ---------------------------------------------------------------------------
// Reachability under concurrent writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn walk_restarts_when_root_moves() {
    let local = Arc::new(GatedBackend::new());
    let fs = ContentFs::new(local.clone(), mem()).unwrap();
    fs.set("/old", "old").await.unwrap();

    local.arm();
    let walk = tokio::spawn({
        let fs = fs.clone();
        async move { fs.active_hashes(None).await }
    });
    local.reached().await;
    let moved = fs.set("/new", "new").await.unwrap();
    local.release();

    let live = walk.await.unwrap().unwrap();
    assert_eq!(live, fs.active_hashes(Some(&moved)).await.unwrap());
    assert!(live.contains(moved.hash()));
}

#[tokio::test]
async fn explicit_root_walk_does_not_restart() {
    let local = Arc::new(GatedBackend::new());
    let fs = ContentFs::new(local.clone(), mem()).unwrap();
    let pinned = fs.set("/old", "old").await.unwrap();

    local.arm();
    let walk = tokio::spawn({
        let fs = fs.clone();
        let pinned = pinned.clone();
        async move { fs.active_hashes(Some(&pinned)).await }
    });
    local.reached().await;
    fs.set("/new", "new").await.unwrap();
    local.release();

    let live = walk.await.unwrap().unwrap();
    assert!(live.contains(pinned.hash()));
    assert_eq!(live.len(), 2);
}
