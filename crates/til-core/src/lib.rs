//! TIL Core - Shared data models for the TIL indexer
//!
//! This crate defines the data structures used throughout the project:
//! `FileTimestamps` mined from commit history, the persisted `Note` record,
//! and parsing of note files into notes.

mod models;
mod note;
mod error;

pub use models::{FileTimestamps, Note};
pub use note::{note_url, NoteFile, DEFAULT_URL_BASE};
pub use error::CoreError;
