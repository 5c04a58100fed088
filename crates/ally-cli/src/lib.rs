//! Ally command line front end
//!
//! Argument parsing, configuration and the command handlers behind the `ally`
//! binary.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::Cli;
pub use commands::{execute, run};
pub use config::AllyConfig;
