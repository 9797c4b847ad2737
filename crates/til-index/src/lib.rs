//! TIL Index - Builds the note database and the README index
//!
//! This crate is responsible for:
//! - Mining creation/update times of every file from Git history
//! - Discovering `<topic>/<name>.md` notes and joining them with those times
//! - Storing notes and their full-text index in the database
//! - Regenerating the index region of the README

pub mod history;
mod config;
mod error;
mod formatting;
mod indexer;
mod readme;
mod stats;

pub use config::TilConfig;
pub use error::IndexError;
pub use history::{derive_timestamps, CommitTouch, TimestampMap, DEFAULT_REF};
pub use indexer::{discover_notes, Indexer};
pub use readme::{group_by_topic, render_index, Synchronizer, TopicGroup, INDEX_END, INDEX_START};
pub use stats::BuildStats;
