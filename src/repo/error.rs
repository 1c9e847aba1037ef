use std::path::PathBuf;

use thiserror::Error;

use crate::object::{DecodeError, Id, UnknownKindError};

/// Describes the potential error conditions that might arise from repo
/// operations.
///
/// Every failure is a distinct, inspectable value; nothing is swallowed or
/// retried internally. Read and decode failures name the object ID whose
/// structural expectation was violated.
#[derive(Debug, Error)]
pub enum Error {
    /// No object with this ID exists in the store.
    #[error("object {0} not found")]
    NotFound(Id),

    /// The stored bytes for this ID do not inflate, or do not match their
    /// own envelope.
    #[error("object {id} is corrupt: {detail}")]
    Corrupt { id: Id, detail: String },

    /// The envelope declares a kind outside {blob, tree, commit}.
    #[error("object {id}: {source}")]
    UnknownKind { id: Id, source: UnknownKindError },

    /// The payload violates the grammar of its declared kind.
    #[error("object {id}: {source}")]
    Malformed { id: Id, source: DecodeError },

    #[error("work dir doesn't exist: {}", .0.display())]
    WorkDirDoesntExist(PathBuf),

    #[error("not a repository (no .git directory): {}", .0.display())]
    GitDirDoesntExist(PathBuf),

    #[error(".git directory already exists: {}", .0.display())]
    GitDirShouldntExist(PathBuf),

    #[error("repository config file missing: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedFormatVersion(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for repo operations.
pub type Result<T> = std::result::Result<T, Error>;
