//! Parsing of note files into `Note` records

use crate::error::CoreError;
use crate::models::{FileTimestamps, Note};

/// Where note links point unless configured otherwise
pub const DEFAULT_URL_BASE: &str = "https://github.com/sleach/til/blob/master";

/// A note file read from disk, not yet joined with its history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// `/`-separated path relative to the repository root
    pub relative_path: String,
    pub topic: String,
    pub title: String,
    pub body: String,
}

impl NoteFile {
    /// Parses a note at `relative_path` (`<topic>/<name>.md`).
    ///
    /// The first line minus leading `#` markers is the title, the rest of
    /// the file is the body. Both are trimmed.
    pub fn parse(relative_path: &str, contents: &str) -> Result<Self, CoreError> {
        let relative_path = relative_path.replace('\\', "/");
        let topic = match relative_path.split_once('/') {
            Some((topic, name)) if !topic.is_empty() && !name.is_empty() && !name.contains('/') => {
                Some(topic.to_string())
            }
            _ => None,
        };
        let topic = topic.ok_or_else(|| CoreError::InvalidNotePath(relative_path.clone()))?;

        let (first, rest) = match contents.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (contents, ""),
        };

        Ok(Self {
            title: first.trim_start_matches('#').trim().to_string(),
            body: rest.trim().to_string(),
            topic,
            relative_path,
        })
    }

    /// Stable identifier derived from the path
    pub fn id(&self) -> String {
        self.relative_path.replace('/', "_")
    }

    /// Joins the note with its mined timestamps
    pub fn into_note(self, timestamps: FileTimestamps, url_base: &str) -> Note {
        Note {
            id: self.id(),
            url: note_url(url_base, &self.relative_path),
            topic: self.topic,
            title: self.title,
            body: self.body,
            created: timestamps.created,
            created_utc: timestamps.created_utc,
            updated: timestamps.updated,
            updated_utc: timestamps.updated_utc,
        }
    }
}

/// Builds the link for a note: `{url_base}/{relative_path}`
pub fn note_url(url_base: &str, relative_path: &str) -> String {
    format!("{}/{}", url_base.trim_end_matches('/'), relative_path.trim_start_matches('/'))
}
