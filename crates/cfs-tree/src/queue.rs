//! The write queue.
//!
//! Writers never run transactions themselves. Each call sends a request with
//! a oneshot reply channel to a single worker task. The worker takes the
//! first waiting request plus everything queued behind it, commits them as
//! one transaction, answers every reply with the outcome, then yields before
//! draining the next batch so writes arriving meanwhile can join it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use cfs_types::HashRef;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{FsError, FsResult};
use crate::fs::StoreContext;
use crate::txn::Transaction;

struct WriteRequest {
    writes: Vec<(String, Bytes)>,
    reply: oneshot::Sender<FsResult<HashRef>>,
}

/// Counters describing the work done by a store's write queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// Transactions that committed.
    pub transactions: u64,
    /// Transactions that failed; every request folded into one saw the error.
    pub failed: u64,
    /// Write requests answered.
    pub requests: u64,
    /// Individual path writes applied by committed transactions.
    pub writes: u64,
}

#[derive(Default)]
struct Counters {
    transactions: AtomicU64,
    failed: AtomicU64,
    requests: AtomicU64,
    writes: AtomicU64,
}

#[derive(Clone)]
pub(crate) struct WriteQueue {
    tx: mpsc::UnboundedSender<WriteRequest>,
    counters: Arc<Counters>,
}

impl WriteQueue {
    /// Spawn the worker on the current Tokio runtime.
    ///
    /// The worker stops once every handle to the queue is dropped.
    pub(crate) fn start(ctx: Arc<StoreContext>) -> FsResult<Self> {
        let handle = Handle::try_current().map_err(|e| FsError::NoRuntime(e.to_string()))?;
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        handle.spawn(run(ctx, rx, Arc::clone(&counters)));
        Ok(Self { tx, counters })
    }

    /// Queue a batch of writes and wait for the transaction that applies it.
    pub(crate) async fn submit(&self, writes: Vec<(String, Bytes)>) -> FsResult<HashRef> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(WriteRequest { writes, reply })
            .map_err(|_| FsError::QueueClosed)?;
        rx.await.map_err(|_| FsError::QueueClosed)?
    }

    pub(crate) fn stats(&self) -> QueueStats {
        QueueStats {
            transactions: self.counters.transactions.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            requests: self.counters.requests.load(Ordering::Relaxed),
            writes: self.counters.writes.load(Ordering::Relaxed),
        }
    }
}

async fn run(
    ctx: Arc<StoreContext>,
    mut rx: mpsc::UnboundedReceiver<WriteRequest>,
    counters: Arc<Counters>,
) {
    let limit = ctx.config.max_coalesced_requests.max(1);

    while let Some(first) = rx.recv().await {
        let mut batch = vec![first];
        while batch.len() < limit {
            match rx.try_recv() {
                Ok(request) => batch.push(request),
                Err(_) => break,
            }
        }

        let mut writes = Vec::new();
        let mut replies = Vec::with_capacity(batch.len());
        for request in batch {
            writes.extend(request.writes);
            replies.push(request.reply);
        }
        let applied = writes.len() as u64;
        debug!(requests = replies.len(), writes = applied, "draining write queue");

        let result = commit(&ctx, writes).await;
        match &result {
            Ok(_) => {
                counters.transactions.fetch_add(1, Ordering::Relaxed);
                counters.writes.fetch_add(applied, Ordering::Relaxed);
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, requests = replies.len(), "queued transaction failed");
            }
        }
        counters
            .requests
            .fetch_add(replies.len() as u64, Ordering::Relaxed);

        for reply in replies {
            // A caller that stopped waiting is not an error.
            let _ = reply.send(result.clone());
        }

        tokio::task::yield_now().await;
    }
    debug!("write queue closed");
}

async fn commit(ctx: &StoreContext, writes: Vec<(String, Bytes)>) -> FsResult<HashRef> {
    let mut txn = Transaction::begin(ctx).await?;
    for (path, content) in writes {
        txn.apply(&path, content).await?;
    }
    txn.commit().await
}
