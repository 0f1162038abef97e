//! The contentfs tree engine.
//!
//! [`ContentFs`] presents a filesystem-like namespace over two content
//! addressed backends. Directories and files form an immutable merkle tree;
//! the only mutable state is the root pointer. Every write builds a new tree
//! from a working copy of the current one, re-hashes the directories it
//! touched, and swaps the root with a compare-and-swap against the root it
//! started from.
//!
//! # Components
//!
//! - Path resolution (`get`, `ls`) through hash-linked directories, reading
//!   from the local backend and falling back to the remote one.
//! - [`Transaction`] -- applies an ordered batch of writes to a working tree
//!   and commits it, or fails with [`FsError::Conflict`] if the root moved.
//! - The write queue -- a single worker task that folds concurrently
//!   submitted writes into one transaction at a time.
//! - The reachability walker (`active_hashes`) and `push`, which copies the
//!   live objects to the remote backend.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use cfs_store::InMemoryBackend;
//! use cfs_tree::ContentFs;
//!
//! # async fn demo() -> cfs_tree::FsResult<()> {
//! let fs = ContentFs::new(Arc::new(InMemoryBackend::new()), Arc::new(InMemoryBackend::new()))?;
//! fs.set("/docs/readme.txt", "hello").await?;
//! assert_eq!(fs.ls("/docs").await?, vec!["readme.txt"]);
//! fs.push(None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod fs;
mod node;
pub mod path;
mod queue;
mod resolve;
pub mod txn;
mod walk;

pub use config::FsConfig;
pub use error::{FsError, FsResult};
pub use fetch::Resolved;
pub use fs::{ContentFs, ContentFsBuilder};
pub use path::Address;
pub use queue::QueueStats;
pub use txn::Transaction;

pub use cfs_store::{Backend, Directory};
pub use cfs_sync::PushReport;
pub use cfs_types::{ContentHash, HashRef, RefKind};
