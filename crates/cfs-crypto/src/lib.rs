//! Content hashing for contentfs.
//!
//! The tree layer treats hashes as opaque backend-assigned strings. Backends
//! that ship with this workspace compute them with a domain-separated BLAKE3
//! [`ContentHasher`]; two hashers with different domains disagree on every
//! input, which is how mismatched backends are modelled in tests.

pub mod hasher;

pub use hasher::ContentHasher;
