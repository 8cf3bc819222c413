//! CLI module for the book API
//!
//! Provides command-line interface for:
//! - serve: Open the database and serve HTTP until interrupted
//! - init: Create the database file and books table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, init_logging, open_store, run_command, serve, Config};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
