use std::path::PathBuf;

use cfs_store::StoreError;
use cfs_tree::FsError;
use thiserror::Error;

/// Errors raised while importing a directory.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entry names become tree keys and must be UTF-8.
    #[error("entry name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("tree error: {0}")]
    Tree(#[from] FsError),
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
