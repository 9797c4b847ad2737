//! Output formatting structures for CLI display

use tabled::Tabled;

/// Table row for displaying a note
#[derive(Tabled)]
pub struct NoteRow {
    #[tabled(rename = "Topic")]
    pub topic: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Created")]
    pub created: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
    #[tabled(rename = "URL")]
    pub url: String,
}
