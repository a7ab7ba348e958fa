//! Tooling Layer
//!
//! Command-line entry points over the reconstruction library.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
