//! Run configuration shared by every operation

use std::path::{Path, PathBuf};
use til_core::DEFAULT_URL_BASE;

use crate::history::DEFAULT_REF;

/// Where the notes, database and README live, and how to walk history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilConfig {
    /// Root of the notes repository
    pub repo_path: PathBuf,

    /// Sled database directory
    pub database: PathBuf,

    /// README file whose marker region gets regenerated
    pub readme: PathBuf,

    /// Branch or tag whose history supplies the timestamps
    pub reference: String,

    /// Prefix for note links
    pub url_base: String,
}

impl TilConfig {
    /// Configuration with every location derived from `repo_path`
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        let repo_path = repo_path.as_ref().to_path_buf();
        Self {
            database: repo_path.join("til.db"),
            readme: repo_path.join("README.md"),
            reference: DEFAULT_REF.to_string(),
            url_base: DEFAULT_URL_BASE.to_string(),
            repo_path,
        }
    }

    pub fn with_database<P: Into<PathBuf>>(mut self, database: P) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_reference<S: Into<String>>(mut self, reference: S) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_url_base<S: Into<String>>(mut self, url_base: S) -> Self {
        self.url_base = url_base.into();
        self
    }
}
