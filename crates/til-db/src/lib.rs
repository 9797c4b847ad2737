//! TIL DB - Persistence layer for indexed notes
//!
//! This crate manages the local Sled database: one tree of note records keyed
//! by their stable identifier, plus an auxiliary full-text index over title
//! and body that is created once and maintained on every later write.

mod database;
mod fts;

pub use database::{DbError, TilDb};
pub use fts::tokenize;
