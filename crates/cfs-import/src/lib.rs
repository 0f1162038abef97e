//! Filesystem import for contentfs.
//!
//! Builds a contentfs tree from a directory on disk. Files become blobs and
//! directories become directory objects, written bottom-up to a backend in
//! file-name order, so importing the same directory twice yields the same
//! root.
//!
//! An [`ImportFilter`] decides which paths are imported. A directory the
//! filter rejects is skipped whole; its contents are never visited.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cfs_import::{from_directory, AcceptAll};
//! use cfs_store::InMemoryBackend;
//!
//! # async fn demo() -> cfs_import::ImportResult<()> {
//! let fs = from_directory(
//!     "./site",
//!     Arc::new(InMemoryBackend::new()),
//!     Arc::new(InMemoryBackend::new()),
//!     &AcceptAll,
//! )
//! .await?;
//! println!("{:?}", fs.ls("/").await?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod walk;

pub use error::{ImportError, ImportResult};
pub use filter::{AcceptAll, FnFilter, ImportFilter, SkipHidden};
pub use walk::{from_directory, import_into, walk, walk_with_summary, ImportSummary};
