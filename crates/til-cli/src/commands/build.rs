//! Build command implementation

use anyhow::{Context, Result};
use til_db::TilDb;
use til_index::{Indexer, TilConfig};

/// Opens the configured database
pub fn open_database(config: &TilConfig) -> Result<TilDb> {
    TilDb::open(&config.database)
        .with_context(|| format!("Failed to open database at {:?}", config.database))
}

/// Indexes all notes of the repository, returning the database for later steps
pub fn cmd_build(config: &TilConfig) -> Result<TilDb> {
    let indexer = Indexer::from_history(config.clone())?;

    log::info!("Building database at {:?}", config.database);
    let db = open_database(config)?;
    indexer.build(&db).context("Failed to build database")?;

    // Final stats are already logged by the indexer
    Ok(db)
}
