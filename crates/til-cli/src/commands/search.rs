//! Search command implementation

use anyhow::Result;
use colored::Colorize;
use tabled::{Table, settings::{Style, Color, Modify, object::Rows}};
use til_db::TilDb;

use crate::helpers::format_relative_time;
use crate::output::NoteRow;

/// Searches notes in the full-text index
pub fn cmd_search(query: &str, db: &TilDb) -> Result<()> {
    let notes = db.search(query)?;

    if notes.is_empty() {
        println!("{} No notes match '{}'", "❌".red(), query.bold());
        return Ok(());
    }

    println!("\n{} {} {}", "🔎".bright_cyan(), notes.len().to_string().bold(), "matching notes".bright_white());

    let rows: Vec<NoteRow> = notes
        .iter()
        .map(|note| NoteRow {
            topic: note.topic.clone(),
            title: note.title.clone(),
            created: note.created_date(),
            updated: format_relative_time(note.updated_utc),
            url: note.url.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_BRIGHT_CYAN));
    println!("{}", table);

    Ok(())
}
