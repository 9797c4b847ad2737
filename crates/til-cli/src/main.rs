//! TIL CLI - Indexes "today I learned" notes and maintains the README index
//!
//! Provides:
//! - Building the note database from notes and their Git history
//! - Printing or rewriting the README index
//! - Keyword search over the indexed notes

mod commands;
mod helpers;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use til_core::DEFAULT_URL_BASE;
use til_index::{TilConfig, DEFAULT_REF};

use commands::{cmd_build, cmd_search, cmd_update, open_database};

#[derive(Parser)]
#[command(name = "til")]
#[command(about = "Manage TIL notes: build the database and update the README index", long_about = None)]
#[command(version)]
struct Cli {
    /// Build the database from notes and their commit history
    #[arg(long)]
    build: bool,

    /// Print the README index generated from the database
    #[arg(long)]
    update: bool,

    /// Rewrite the README in place instead of printing
    #[arg(long, requires = "update")]
    rewrite: bool,

    /// Path to the notes repository
    #[arg(long, default_value = ".")]
    repo_path: PathBuf,

    /// Branch or tag whose history supplies note timestamps
    #[arg(long = "ref", default_value = DEFAULT_REF)]
    reference: String,

    /// Path to the database (default: <repo-path>/til.db)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Prefix for note links in the database and README
    #[arg(long, default_value = DEFAULT_URL_BASE)]
    url_base: String,

    /// Search note titles and bodies
    #[arg(short, long, value_name = "QUERY")]
    search: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> TilConfig {
        let config = TilConfig::new(&self.repo_path)
            .with_reference(self.reference.as_str())
            .with_url_base(self.url_base.as_str());
        match &self.database {
            Some(path) => config.with_database(path),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logger
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&cli.log_level)
    ).init();

    if !cli.build && !cli.update && cli.search.is_none() {
        Cli::command()
            .write_help(&mut std::io::stderr())
            .context("Failed to print usage")?;
        std::process::exit(2);
    }

    let config = cli.config();

    // --build opens the database only once history has been mined
    let db = if cli.build {
        cmd_build(&config)?
    } else {
        open_database(&config)?
    };

    if let Some(query) = &cli.search {
        cmd_search(query, &db)?;
    }
    if cli.update {
        cmd_update(&config, db, cli.rewrite)?;
    }

    Ok(())
}
