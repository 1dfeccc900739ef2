//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, RunArgs, ShowArgs, SweepArgs};
pub use types::OutputFormat;
