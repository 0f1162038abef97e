//! Foundation types for contentfs.
//!
//! Every object in a contentfs tree is addressed by the hash its backend
//! assigned to it. This crate defines that identifier and the typed reference
//! the tree layer builds on top of it.
//!
//! # Key Types
//!
//! - [`ContentHash`] -- Opaque, backend-assigned content hash
//! - [`RefKind`] -- Whether a reference points at a blob or a directory object
//! - [`HashRef`] -- Content hash plus kind, written `<hash>` or `<hash>.dir`

pub mod error;
pub mod hash;

pub use error::TypeError;
pub use hash::{ContentHash, HashRef, RefKind, DIR_SUFFIX};
