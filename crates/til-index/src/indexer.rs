//! Note discovery and database build

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};
use til_core::NoteFile;
use til_db::TilDb;

use crate::config::TilConfig;
use crate::error::IndexError;
use crate::history::{derive_timestamps, TimestampMap};
use crate::stats::BuildStats;

/// Lazily lists `<repo>/<topic>/<name>.md` files. Dot-directories count as
/// topics too.
pub fn discover_notes(repo_path: &Path) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let root = repo_path
        .to_str()
        .with_context(|| format!("Repository path is not valid UTF-8: {:?}", repo_path))?;
    let pattern = format!("{}/*/*.md", Pattern::escape(root.trim_end_matches('/')));

    let paths = glob::glob_with(&pattern, MatchOptions::new())
        .with_context(|| format!("Invalid note pattern {}", pattern))?;

    Ok(paths
        .map(|entry| entry.context("Failed to read note path"))
        .filter(|entry| entry.as_ref().map_or(true, |path| path.is_file())))
}

/// `/`-joined path of `path` below `root`, the key used by the history map
fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let bare_root: PathBuf = root.components().filter(|c| *c != Component::CurDir).collect();
    let relative = path
        .strip_prefix(root)
        .or_else(|_| path.strip_prefix(&bare_root))
        .with_context(|| format!("{:?} is outside {:?}", path, root))?;
    let parts = relative
        .components()
        .filter(|c| *c != Component::CurDir)
        .map(|c| {
            c.as_os_str()
                .to_str()
                .with_context(|| format!("Note path is not valid UTF-8: {:?}", path))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}

/// Main indexer structure
///
/// Created from mined history, so a bad repository or ref fails before any
/// database is touched.
pub struct Indexer {
    config: TilConfig,
    times: TimestampMap,
    mined_in: Duration,
}

impl Indexer {
    /// Mines the commit history of the configured repository and ref
    pub fn from_history(config: TilConfig) -> Result<Self> {
        let start_time = Instant::now();
        log::info!("Reading history of {} in {:?}", config.reference, config.repo_path);

        let times = derive_timestamps(&config.repo_path, &config.reference)
            .context("Failed to read commit history")?;

        Ok(Self {
            config,
            times,
            mined_in: start_time.elapsed(),
        })
    }

    /// Commit times of every file seen in history
    pub fn times(&self) -> &TimestampMap {
        &self.times
    }

    /// Stores every note with its commit times, then creates the full-text
    /// index unless it already exists.
    ///
    /// Stops at the first note without history; rows written before that stay.
    pub fn build(&self, db: &TilDb) -> Result<BuildStats> {
        let start_time = Instant::now();
        let repo_path = &self.config.repo_path;

        let mut stats = BuildStats::default();
        for entry in discover_notes(repo_path)? {
            let path = entry?;
            let relative = relative_key(repo_path, &path)?;
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read note {:?}", path))?;

            let file = NoteFile::parse(&relative, &contents)?;
            let timestamps = self
                .times
                .get(&file.relative_path)
                .copied()
                .ok_or_else(|| IndexError::MissingTimestamp(file.relative_path.clone()))?;
            let note = file.into_note(timestamps, &self.config.url_base);

            if db.upsert(&note)? {
                stats.notes_inserted += 1;
            }
            stats.notes_indexed += 1;
            log::debug!("Stored {} ({})", note.id, note.title);
        }

        db.flush()?;
        stats.fts_created = db.enable_fts()?;
        db.flush()?;

        stats.elapsed = self.mined_in + start_time.elapsed();
        log::info!("✅ {}", stats);
        Ok(stats)
    }
}
