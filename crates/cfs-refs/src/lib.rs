//! Root pointer management for contentfs.
//!
//! A contentfs tree is immutable; the only mutable state is the root pointer
//! naming the current top-level directory. Every commit replaces it with a
//! compare-and-swap against the root the commit started from, so a writer
//! that lost a race finds out instead of silently overwriting the winner.
//!
//! # Modules
//!
//! - [`error`] -- Error types for root operations
//! - [`traits`] -- The [`RootStore`] trait defining the storage interface
//! - [`memory`] -- In-memory [`InMemoryRootStore`]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{describe, RootError, RootResult};
pub use memory::InMemoryRootStore;
pub use traits::RootStore;
