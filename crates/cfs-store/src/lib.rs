//! Content-addressed backends for contentfs.
//!
//! A backend is a pure key-value store keyed by content hash: it hashes what
//! it is given and hands back what it is asked for. It never interprets
//! object contents. The tree layer above stores two kinds of objects in it:
//!
//! - blobs -- raw bytes, stored verbatim
//! - directories -- a [`Directory`] listing serialized as a flat JSON object
//!   mapping entry names to textual hash references
//!
//! # Backends
//!
//! All backends implement the [`Backend`] trait and declare what they can do
//! through [`Capabilities`]. `get` and `set` are required; `missing` is an
//! optional capability used to narrow pushes.
//!
//! - [`InMemoryBackend`] -- `HashMap`-based backend for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. `set` is idempotent: the same bytes always produce the same hash.
//! 3. Backends own the hash function; callers never recompute hashes.
//! 4. All errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod object;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBackend;
pub use object::{validate_name, Directory};
pub use traits::{Backend, Capabilities, Capability};
