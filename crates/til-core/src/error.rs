//! Error types for til-core

/// Errors specific to til-core
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Note path is not <topic>/<file>: {0}")]
    InvalidNotePath(String),
}
