//! Creation and update times mined from commit history
//!
//! File modification times do not survive a clone, so each note's times come
//! from the commits that touched it: the first one sets `created`, every one
//! (including the first) moves `updated` forward.

use chrono::{DateTime, FixedOffset};
use git2::{Commit, Repository, Sort};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use til_core::FileTimestamps;

use crate::error::IndexError;

/// Ref walked when none is configured
pub const DEFAULT_REF: &str = "master";

/// Repo-relative path → first/last commit times
pub type TimestampMap = HashMap<String, FileTimestamps>;

/// Paths changed by one commit, with the commit's time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTouch {
    /// Committer time in the committer's recorded offset
    pub time: DateTime<FixedOffset>,

    /// Distinct `/`-separated paths changed relative to the first parent
    pub paths: Vec<String>,
}

/// Single forward pass over commits that must already be oldest first.
pub fn accumulate<I>(commits: I) -> TimestampMap
where
    I: IntoIterator<Item = CommitTouch>,
{
    let mut times = TimestampMap::new();
    for CommitTouch { time, paths } in commits {
        for path in paths {
            times
                .entry(path)
                .and_modify(|ts| ts.touch(time))
                .or_insert_with(|| FileTimestamps::first_seen(time));
        }
    }
    times
}

/// Resolves `reference` and returns its whole ancestry, oldest commit first.
///
/// Parents always come before children, even when a skewed clock dates a
/// child earlier than its parent; times only break ties between branches.
pub fn load_commits(repo: &Repository, reference: &str) -> Result<Vec<CommitTouch>, IndexError> {
    let tip = repo
        .revparse_single(reference)
        .and_then(|object| object.peel_to_commit())
        .map_err(|source| IndexError::Reference {
            reference: reference.to_string(),
            source,
        })?;
    log::debug!("Resolved {} to {}", reference, tip.id());

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    revwalk.push(tip.id())?;

    let mut commits = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;
        commits.push(commit_touch(repo, &commit)?);
    }

    // revwalk yields newest first
    commits.reverse();
    Ok(commits)
}

/// Mines first/last commit times for every file ever touched by `reference`.
pub fn derive_timestamps<P: AsRef<Path>>(repo_path: P, reference: &str) -> Result<TimestampMap, IndexError> {
    let repo_path = repo_path.as_ref();
    let repo = Repository::open(repo_path).map_err(|source| IndexError::Repository {
        path: repo_path.to_path_buf(),
        source,
    })?;

    let commits = load_commits(&repo, reference)?;
    log::info!("Walking {} commits reachable from {}", commits.len(), reference);

    let times = accumulate(commits);
    log::info!("Found commit history for {} files", times.len());
    Ok(times)
}

fn commit_touch(repo: &Repository, commit: &Commit) -> Result<CommitTouch, IndexError> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

    let mut paths = BTreeSet::new();
    for delta in diff.deltas() {
        let path = delta.new_file().path().or_else(|| delta.old_file().path());
        match path.and_then(|p| p.to_str()) {
            Some(p) => {
                paths.insert(p.to_string());
            }
            None => log::warn!("Skipping non UTF-8 path in commit {}: {:?}", commit.id(), path),
        }
    }

    let time = commit_time(commit.time()).ok_or_else(|| {
        git2::Error::from_str(&format!("Commit {} has an unrepresentable timestamp", commit.id()))
    })?;
    log::debug!("Commit {} at {} touches {} paths", commit.id(), time, paths.len());

    Ok(CommitTouch {
        time,
        paths: paths.into_iter().collect(),
    })
}

/// Converts a git timestamp, keeping its offset
fn commit_time(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    DateTime::from_timestamp(time.seconds(), 0).map(|utc| utc.with_timezone(&offset))
}
