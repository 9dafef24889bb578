//! Tooling & Integration Layer
//!
//! Command-line front end over the library operations.

pub mod cli;

pub use cli::{Cli, CliContext, CommandOutput, Commands, CompareBy};
