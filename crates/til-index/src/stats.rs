//! Statistics reported by a build

use std::time::Duration;
use crate::formatting::{format_duration, format_number};

/// Outcome of one `Indexer::build` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Note files read and stored
    pub notes_indexed: usize,

    /// Of those, ids that were not in the database before
    pub notes_inserted: usize,

    /// Whether this run created the full-text index
    pub fts_created: bool,

    pub elapsed: Duration,
}

impl std::fmt::Display for BuildStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Notes: {} indexed, {} new | Full-text index: {} | Time: {}",
            format_number(self.notes_indexed),
            format_number(self.notes_inserted),
            if self.fts_created { "created" } else { "kept" },
            format_duration(self.elapsed)
        )
    }
}
