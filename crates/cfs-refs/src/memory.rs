//! In-memory root store.
//!
//! [`InMemoryRootStore`] keeps the root pointer behind a `RwLock`. Share one
//! instance (behind an `Arc`) between several stores to give them a common
//! root, as independent writers against the same namespace.

use std::sync::RwLock;

use cfs_types::HashRef;
use tracing::debug;

use crate::error::{describe, RootError, RootResult};
use crate::traits::RootStore;

/// An in-memory implementation of [`RootStore`].
#[derive(Debug, Default)]
pub struct InMemoryRootStore {
    root: RwLock<Option<HashRef>>,
}

impl InMemoryRootStore {
    /// Create a store with no root installed.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RootStore for InMemoryRootStore {
    fn get_root(&self) -> RootResult<Option<HashRef>> {
        let root = self
            .root
            .read()
            .map_err(|e| RootError::Storage(format!("lock poisoned: {e}")))?;
        Ok(root.clone())
    }

    fn set_root(&self, root: &HashRef, expected: Option<&HashRef>) -> RootResult<()> {
        if !root.is_dir() {
            return Err(RootError::NotDirectory(root.clone()));
        }

        let mut current = self
            .root
            .write()
            .map_err(|e| RootError::Storage(format!("lock poisoned: {e}")))?;

        if current.as_ref() != expected {
            return Err(RootError::RootMismatch {
                expected: describe(expected),
                actual: describe(current.as_ref()),
            });
        }

        debug!(old = %describe(expected), new = %root, "root swapped");
        *current = Some(root.clone());
        Ok(())
    }
}
