use thiserror::Error;

/// Errors produced by type operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("content hash is empty")]
    EmptyHash,

    #[error("content hash contains a reserved character: {0}")]
    ReservedCharacter(String),

    #[error("invalid hash reference: {0}")]
    InvalidHashRef(String),
}
