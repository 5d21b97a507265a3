//! Command-line front end.

mod args;
mod commands;
mod repl;

pub use args::Cli;
pub use commands::execute;
