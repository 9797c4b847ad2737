//! Update command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use til_db::TilDb;
use til_index::{Synchronizer, TilConfig};

/// Prints the README index, or rewrites it in place with `rewrite`
pub fn cmd_update(config: &TilConfig, db: TilDb, rewrite: bool) -> Result<()> {
    let sync = Synchronizer::new(db)?;

    if rewrite {
        sync.rewrite(&config.readme)
            .with_context(|| format!("Failed to update {:?}", config.readme))?;
        eprintln!("{} Updated {}", "✅".green(), config.readme.display().to_string().bold());
    } else {
        println!("{}", sync.render()?);
    }

    Ok(())
}
