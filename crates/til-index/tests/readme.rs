//! Tests for README index rendering and rewriting

use anyhow::Result;
use chrono::DateTime;
use tempfile::TempDir;
use til_core::{FileTimestamps, Note, NoteFile};
use til_db::TilDb;
use til_index::{group_by_topic, render_index, IndexError, Synchronizer, INDEX_END, INDEX_START};

// ── fixtures ─────────────────────────────────────────────────────────────────

const BASE: &str = "https://til.example.com";

fn note(path: &str, title: &str, created: &str) -> Note {
    let ts = FileTimestamps::first_seen(DateTime::parse_from_rfc3339(created).unwrap());
    NoteFile::parse(path, &format!("# {}\nbody", title))
        .unwrap()
        .into_note(ts, BASE)
}

/// python is alphabetically later but has the oldest note
fn sample_notes() -> Vec<Note> {
    vec![
        note("python/walrus.md", "Walrus", "2019-01-01T12:00:00+00:00"),
        note("go/leaks.md", "Leaks", "2019-02-01T12:00:00+00:00"),
        note("python/match.md", "Match", "2019-03-01T12:00:00+00:00"),
        note("bash/traps.md", "Traps", "2019-04-01T23:30:00-05:00"),
    ]
}

fn synchronizer_with(notes: &[Note]) -> Result<(TempDir, Synchronizer)> {
    let tmp = TempDir::new()?;
    let db = TilDb::open(tmp.path().join("til.db"))?;
    for n in notes {
        db.upsert(n)?;
    }
    Ok((tmp, Synchronizer::new(db)?))
}

const EXPECTED: &str = "<!-- index starts -->
## python

* [Walrus](https://til.example.com/python/walrus.md) - 2019-01-01
* [Match](https://til.example.com/python/match.md) - 2019-03-01

## go

* [Leaks](https://til.example.com/go/leaks.md) - 2019-02-01

## bash

* [Traps](https://til.example.com/bash/traps.md) - 2019-04-01
<!-- index ends -->";

// ── grouping / rendering ─────────────────────────────────────────────────────

#[test]
fn test_groups_in_first_appearance_order() {
    let groups = group_by_topic(sample_notes());
    let topics: Vec<&str> = groups.iter().map(|g| g.topic.as_str()).collect();
    assert_eq!(topics, vec!["python", "go", "bash"]);

    let python: Vec<&str> = groups[0].notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(python, vec!["Walrus", "Match"]);
}

#[test]
fn test_render_layout() {
    assert_eq!(render_index(&group_by_topic(sample_notes())), EXPECTED);
}

#[test]
fn test_render_reads_database_in_created_order() -> Result<()> {
    let mut shuffled = sample_notes();
    shuffled.reverse();
    let (_tmp, sync) = synchronizer_with(&shuffled)?;
    assert_eq!(sync.render()?, EXPECTED);
    Ok(())
}

// ── rewrite ──────────────────────────────────────────────────────────────────

#[test]
fn test_rewrite_preserves_outside_bytes() -> Result<()> {
    let (tmp, sync) = synchronizer_with(&sample_notes())?;
    let readme = tmp.path().join("README.md");
    let before = "# TIL\r\n\nIntro text  \n\n";
    let after = "\n\nFooter with trailing spaces   \n";
    std::fs::write(&readme, format!("{before}{INDEX_START}\nstale\n{INDEX_END}{after}"))?;

    sync.rewrite(&readme)?;

    let contents = std::fs::read_to_string(&readme)?;
    assert_eq!(contents, format!("{before}{EXPECTED}{after}"));
    Ok(())
}

#[test]
fn test_rewrite_is_stable() -> Result<()> {
    let (tmp, sync) = synchronizer_with(&sample_notes())?;
    let readme = tmp.path().join("README.md");
    std::fs::write(&readme, format!("head\n{INDEX_START}\n{INDEX_END}\ntail\n"))?;

    sync.rewrite(&readme)?;
    let once = std::fs::read_to_string(&readme)?;
    sync.rewrite(&readme)?;
    assert_eq!(std::fs::read_to_string(&readme)?, once);
    Ok(())
}

#[test]
fn test_rewrite_without_markers_fails_and_leaves_file() -> Result<()> {
    let (tmp, sync) = synchronizer_with(&sample_notes())?;
    let readme = tmp.path().join("README.md");
    let original = format!("# TIL\n{INDEX_START}\nno end marker\n");
    std::fs::write(&readme, &original)?;

    let err = sync.rewrite(&readme).unwrap_err();
    assert!(matches!(err.downcast_ref::<IndexError>(), Some(IndexError::MarkerNotFound(_))));
    assert_eq!(std::fs::read_to_string(&readme)?, original);
    Ok(())
}
