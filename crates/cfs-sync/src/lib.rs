//! Push synchronization for contentfs.
//!
//! Copies a set of live objects from the local backend to a remote backend.
//! The remote is asked which objects it lacks when it supports `missing`;
//! every transferred object is checked against the hash the remote computed
//! for it.
//!
//! A push always works from the full live set. It does not diff against the
//! tree the remote held before.

pub mod error;
pub mod negotiation;
pub mod push;
pub mod types;
pub mod verifier;

pub use error::{SyncError, SyncResult};
pub use negotiation::NegotiationEngine;
pub use push::PushEngine;
pub use types::{Negotiation, PushReport};
pub use verifier::TransferVerifier;
