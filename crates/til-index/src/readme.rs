//! README index generation

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::collections::HashMap;
use std::path::Path;
use til_core::Note;
use til_db::TilDb;

use crate::error::IndexError;

pub const INDEX_START: &str = "<!-- index starts -->";
pub const INDEX_END: &str = "<!-- index ends -->";

/// Notes of one topic, in creation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicGroup {
    pub topic: String,
    pub notes: Vec<Note>,
}

/// Groups notes that are already sorted by `created_utc`.
///
/// Topics appear in the order of their oldest note, not alphabetically.
pub fn group_by_topic(notes: Vec<Note>) -> Vec<TopicGroup> {
    let mut groups: Vec<TopicGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for note in notes {
        match positions.get(&note.topic) {
            Some(&i) => groups[i].notes.push(note),
            None => {
                positions.insert(note.topic.clone(), groups.len());
                groups.push(TopicGroup {
                    topic: note.topic.clone(),
                    notes: vec![note],
                });
            }
        }
    }

    groups
}

/// Renders the marker-delimited index block.
///
/// Example output:
/// ```text
/// <!-- index starts -->
/// ## go
///
/// * [Goroutine leaks](https://.../go/leaks.md) - 2019-06-01
///
/// ## python
///
/// * [The walrus operator](https://.../python/walrus.md) - 2020-01-01
/// <!-- index ends -->
/// ```
pub fn render_index(groups: &[TopicGroup]) -> String {
    let mut lines = vec![INDEX_START.to_string()];
    for group in groups {
        lines.push(format!("## {}\n", group.topic));
        for note in &group.notes {
            lines.push(format!("* [{}]({}) - {}", note.title, note.url, note.created_date()));
        }
        lines.push(String::new());
    }
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.push(INDEX_END.to_string());
    lines.join("\n")
}

/// Renders the README index from the database
pub struct Synchronizer {
    db: TilDb,

    /// From the first start marker through the last end marker
    region: Regex,
}

impl Synchronizer {
    pub fn new(db: TilDb) -> Result<Self> {
        let region = Regex::new(&format!(
            "(?s){}.*{}",
            regex::escape(INDEX_START),
            regex::escape(INDEX_END)
        ))
        .context("Failed to compile index marker regex")?;
        Ok(Self { db, region })
    }

    /// Index block for the notes currently in the database
    pub fn render(&self) -> Result<String> {
        let notes = self.db.notes_by_created()?;
        Ok(render_index(&group_by_topic(notes)))
    }

    /// Swaps the marker region of `contents` for `index`, leaving every
    /// byte outside it as is. `None` if the markers are missing.
    pub fn replace_region(&self, contents: &str, index: &str) -> Option<String> {
        if !self.region.is_match(contents) {
            return None;
        }
        Some(self.region.replace_all(contents, NoExpand(index)).into_owned())
    }

    /// Regenerates the marker region of the file at `readme` in place
    pub fn rewrite(&self, readme: &Path) -> Result<()> {
        let index = self.render()?;
        let contents = std::fs::read_to_string(readme)
            .with_context(|| format!("Failed to read {:?}", readme))?;

        let updated = self
            .replace_region(&contents, &index)
            .ok_or_else(|| IndexError::MarkerNotFound(readme.to_path_buf()))?;

        std::fs::write(readme, updated).with_context(|| format!("Failed to write {:?}", readme))?;
        log::info!("Rewrote index in {:?}", readme);
        Ok(())
    }
}
