//! Git repository fixtures with controlled commit times

#![allow(dead_code)]

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

/// Seconds since epoch for a commit, plus the committer's offset in minutes
pub type When = (i64, i32);

pub const T1: When = (1_577_869_200, 60); // 2020-01-01 10:00 +01:00
pub const T2: When = (1_580_547_600, 60); // 2020-02-01 10:00 +01:00
pub const T3: When = (1_583_074_800, -300); // 2020-03-01 10:00 -05:00

pub struct FixtureRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl FixtureRepo {
    /// Empty repository whose HEAD is `master`
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Repository::init_opts(dir.path(), &opts).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file without staging it
    pub fn write(&self, rel: &str, contents: &str) {
        let full = self.dir.path().join(rel);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, contents).unwrap();
    }

    /// Commits the given changes on HEAD. `None` contents delete the file.
    pub fn commit(&self, changes: &[(&str, Option<&str>)], when: When) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (rel, contents) in changes {
            match contents {
                Some(text) => {
                    self.write(rel, text);
                    index.add_path(Path::new(rel)).unwrap();
                }
                None => {
                    std::fs::remove_file(self.dir.path().join(rel)).unwrap();
                    index.remove_path(Path::new(rel)).unwrap();
                }
            }
        }
        index.write().unwrap();

        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::new("Til Tester", "til@example.com", &Time::new(when.0, when.1)).unwrap();
        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "update notes", &tree, &parent_refs)
            .unwrap()
    }
}

/// `chrono` view of a fixture time, in its own offset
pub fn at(when: When) -> chrono::DateTime<chrono::FixedOffset> {
    let offset = chrono::FixedOffset::east_opt(when.1 * 60).unwrap();
    chrono::DateTime::from_timestamp(when.0, 0).unwrap().with_timezone(&offset)
}
