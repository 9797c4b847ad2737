//! Command implementations

mod build;
mod search;
mod update;

pub use build::{cmd_build, open_database};
pub use search::cmd_search;
pub use update::cmd_update;
