//! Core data models for the indexer

use chrono::{DateTime, FixedOffset, Utc};

/// First and last appearance of a file in commit history.
///
/// `created` keeps the offset recorded on the commit that first touched the
/// file; the `_utc` fields hold the same instants normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTimestamps {
    pub created: DateTime<FixedOffset>,
    pub created_utc: DateTime<Utc>,
    pub updated: DateTime<FixedOffset>,
    pub updated_utc: DateTime<Utc>,
}

impl FileTimestamps {
    /// Record for a file seen for the first time at `at`
    pub fn first_seen(at: DateTime<FixedOffset>) -> Self {
        let utc = at.with_timezone(&Utc);
        Self {
            created: at,
            created_utc: utc,
            updated: at,
            updated_utc: utc,
        }
    }

    /// Moves the last-updated time to `at`; `created` is never touched
    pub fn touch(&mut self, at: DateTime<FixedOffset>) {
        self.updated = at;
        self.updated_utc = at.with_timezone(&Utc);
    }

    /// Whether `created_utc <= updated_utc` holds
    pub fn is_consistent(&self) -> bool {
        self.created_utc <= self.updated_utc
    }
}

/// Note record in the database
///
/// One row per markdown file, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Stable key: repo-relative path with `/` replaced by `_` (e.g. "python_one.md")
    pub id: String,

    /// Topic directory the note lives in (e.g. "python")
    pub topic: String,

    /// First line of the file without the leading `#`
    pub title: String,

    /// Link to the rendered note
    pub url: String,

    /// Remaining file content, trimmed
    pub body: String,

    pub created: DateTime<FixedOffset>,
    pub created_utc: DateTime<Utc>,
    pub updated: DateTime<FixedOffset>,
    pub updated_utc: DateTime<Utc>,
}

impl Note {
    /// Generates a key for database storage
    pub fn key(&self) -> &str {
        &self.id
    }

    /// Timestamps of this note as mined from history
    pub fn timestamps(&self) -> FileTimestamps {
        FileTimestamps {
            created: self.created,
            created_utc: self.created_utc,
            updated: self.updated,
            updated_utc: self.updated_utc,
        }
    }

    /// Calendar day of `created` in its own offset (e.g. "2020-05-01")
    pub fn created_date(&self) -> String {
        self.created.format("%Y-%m-%d").to_string()
    }
}

