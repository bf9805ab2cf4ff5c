//! Credify CLI library.
//!
//! Screens, rendering, configuration and commands for the Credify
//! command-line client.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod view;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
