//! Database operations and management

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::collections::HashSet;
use std::path::Path;
use til_core::Note;

use crate::fts::{note_tokens, parse_query, posting_id, posting_key};

/// Key in the meta tree recording that the full-text index exists
const FTS_MARKER: &[u8] = b"fts";

/// Columns covered by the full-text index
const FTS_COLUMNS: &str = "title,body";

/// Errors with a meaning beyond "storage failed"
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Full-text index has not been created yet (run --build first)")]
    FtsMissing,
}

// ---------------------------------------------------------------------------
// Compact binary storage format
// ---------------------------------------------------------------------------

/// An instant with the UTC offset it was recorded in.
/// The UTC view is recomputed on load, so it is never stored.
#[derive(Serialize, Deserialize)]
struct StoredStamp {
    secs: i64,
    offset: i32,
}

impl StoredStamp {
    fn from_datetime(at: &DateTime<FixedOffset>) -> Self {
        Self {
            secs: at.timestamp(),
            offset: at.offset().local_minus_utc(),
        }
    }

    fn to_datetime(&self) -> Result<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset)
            .with_context(|| format!("Invalid UTC offset {}s", self.offset))?;
        let utc = DateTime::<Utc>::from_timestamp(self.secs, 0)
            .with_context(|| format!("Timestamp out of range: {}", self.secs))?;
        Ok(utc.with_timezone(&offset))
    }
}

/// Internal representation stored in sled
#[derive(Serialize, Deserialize)]
struct StoredNote {
    id: String,
    topic: String,
    title: String,
    url: String,
    body: String,
    created: StoredStamp,
    updated: StoredStamp,
}

/// Serialize a `Note` into compact binary bytes.
fn pack(note: &Note) -> Result<Vec<u8>> {
    let stored = StoredNote {
        id: note.id.clone(),
        topic: note.topic.clone(),
        title: note.title.clone(),
        url: note.url.clone(),
        body: note.body.clone(),
        created: StoredStamp::from_datetime(&note.created),
        updated: StoredStamp::from_datetime(&note.updated),
    };
    bincode::serialize(&stored).context("Failed to serialize Note")
}

/// Deserialize a `Note` from compact binary bytes.
fn unpack(bytes: &[u8]) -> Result<Note> {
    let stored: StoredNote = bincode::deserialize(bytes).context("Failed to deserialize Note")?;
    let created = stored.created.to_datetime()?;
    let updated = stored.updated.to_datetime()?;
    Ok(Note {
        id: stored.id,
        topic: stored.topic,
        title: stored.title,
        url: stored.url,
        body: stored.body,
        created,
        created_utc: created.with_timezone(&Utc),
        updated,
        updated_utc: updated.with_timezone(&Utc),
    })
}

/// Main structure managing the database
#[derive(Debug)]
pub struct TilDb {
    /// Tree storing notes (key: note id, e.g. "python_one.md")
    notes: sled::Tree,

    /// Full-text postings over title and body (key: "token\0id")
    fts: sled::Tree,

    /// Bookkeeping flags such as whether `fts` has been built
    meta: sled::Tree,

    /// Sled database instance
    db: Db,
}

impl TilDb {
    /// Opens or creates a new database at the specified location
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path.as_ref())
            .with_context(|| format!("Failed to open database at {:?}", path.as_ref()))?;

        let notes = db.open_tree("notes").context("Failed to open notes tree")?;
        let fts = db.open_tree("notes_fts").context("Failed to open notes_fts tree")?;
        let meta = db.open_tree("meta").context("Failed to open meta tree")?;

        Ok(Self { notes, fts, meta, db })
    }

    /// Inserts a note or replaces the one stored under the same id.
    ///
    /// Returns `true` when the id was not present before. When the full-text
    /// index exists, the note's postings are replaced along with the row.
    pub fn upsert(&self, note: &Note) -> Result<bool> {
        let value = pack(note)?;
        let previous = self
            .notes
            .insert(note.key().as_bytes(), value)
            .with_context(|| format!("Failed to store note {}", note.key()))?;

        if self.has_fts()? {
            if let Some(old_bytes) = &previous {
                match unpack(old_bytes) {
                    Ok(old_note) => self.remove_postings(&old_note)?,
                    Err(e) => log::warn!("Corrupted entry for {}, postings not cleared: {:?}", note.key(), e),
                }
            }
            self.add_postings(note)?;
        }

        Ok(previous.is_none())
    }

    /// Retrieves a note by its id
    pub fn get(&self, id: &str) -> Result<Option<Note>> {
        match self.notes.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(unpack(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All notes, oldest `created_utc` first (ties broken by id)
    pub fn notes_by_created(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::with_capacity(self.notes.len());
        for item in self.notes.iter() {
            let (_, value) = item.context("Failed to read from database")?;
            notes.push(unpack(&value)?);
        }
        sort_by_created(&mut notes);
        Ok(notes)
    }

    /// Whether the full-text index has been created
    pub fn has_fts(&self) -> Result<bool> {
        Ok(self.meta.contains_key(FTS_MARKER)?)
    }

    /// Builds the full-text index over title and body of every stored note.
    ///
    /// Does nothing and returns `false` if the index already exists; later
    /// writes keep it current through `upsert`.
    pub fn enable_fts(&self) -> Result<bool> {
        if self.has_fts()? {
            log::debug!("Full-text index already present, not rebuilding");
            return Ok(false);
        }

        let mut indexed = 0;
        for item in self.notes.iter() {
            let (_, value) = item.context("Failed to read from database")?;
            self.add_postings(&unpack(&value)?)?;
            indexed += 1;
        }

        self.meta
            .insert(FTS_MARKER, FTS_COLUMNS.as_bytes())
            .context("Failed to record full-text index")?;
        log::info!("Created full-text index over {} for {} notes", FTS_COLUMNS, indexed);
        Ok(true)
    }

    /// Keyword search over title and body.
    ///
    /// Every term must match; `term*` matches as a prefix. Results are in
    /// `created_utc` order, there is no ranking.
    pub fn search(&self, query: &str) -> Result<Vec<Note>> {
        if !self.has_fts()? {
            return Err(DbError::FtsMissing.into());
        }

        let mut matched: Option<HashSet<String>> = None;
        for term in parse_query(query) {
            let mut ids = HashSet::new();
            for item in self.fts.scan_prefix(term.scan_prefix()).keys() {
                let key = item.context("Failed to read full-text index")?;
                if let Some(id) = posting_id(&key) {
                    ids.insert(id);
                }
            }
            matched = Some(match matched {
                Some(prev) => prev.intersection(&ids).cloned().collect(),
                None => ids,
            });
        }

        let mut results = Vec::new();
        for id in matched.unwrap_or_default() {
            if let Some(note) = self.get(&id)? {
                results.push(note);
            }
        }
        sort_by_created(&mut results);
        Ok(results)
    }

    /// Returns the number of stored notes
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Checks if database is empty (nothing indexed yet)
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Flushes all pending operations to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush().context("Failed to flush database")?;
        Ok(())
    }

    fn add_postings(&self, note: &Note) -> Result<()> {
        for token in note_tokens(note) {
            self.fts
                .insert(posting_key(&token, note.key()), Vec::<u8>::new())
                .context("Failed to update full-text index")?;
        }
        Ok(())
    }

    fn remove_postings(&self, note: &Note) -> Result<()> {
        for token in note_tokens(note) {
            self.fts
                .remove(posting_key(&token, note.key()))
                .context("Failed to update full-text index")?;
        }
        Ok(())
    }
}

fn sort_by_created(notes: &mut [Note]) {
    notes.sort_by(|a, b| a.created_utc.cmp(&b.created_utc).then_with(|| a.id.cmp(&b.id)));
}
