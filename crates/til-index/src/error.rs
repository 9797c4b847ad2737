//! Error types for til-index

use std::path::PathBuf;

/// Fatal conditions of a build or README run
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Path is not a git repository: {path}")]
    Repository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Cannot resolve ref '{reference}' to a commit")]
    Reference {
        reference: String,
        #[source]
        source: git2::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("No commit history for {0} (uncommitted or renamed?)")]
    MissingTimestamp(String),

    #[error("Index markers not found in {0}")]
    MarkerNotFound(PathBuf),
}
