//! The [`RootStore`] trait defining the root pointer storage interface.

use cfs_types::HashRef;

use crate::error::RootResult;

/// Storage for the single mutable root pointer.
///
/// Implementations must be thread-safe (`Send + Sync`) and make
/// [`set_root`](RootStore::set_root) an atomic compare-and-swap: the new root
/// is installed only if the current root equals `expected`.
pub trait RootStore: Send + Sync {
    /// Read the current root. Returns `Ok(None)` until a root is installed.
    fn get_root(&self) -> RootResult<Option<HashRef>>;

    /// Install `root` if the current root equals `expected`.
    ///
    /// Fails with [`RootError::NotDirectory`](crate::RootError::NotDirectory)
    /// for blob references and with
    /// [`RootError::RootMismatch`](crate::RootError::RootMismatch) if the
    /// root moved.
    fn set_root(&self, root: &HashRef, expected: Option<&HashRef>) -> RootResult<()>;
}
