//! CLI argument definitions using clap
//!
//! Commands:
//! - book-api serve [--config <path>] [--port <port>] [--database <path>]
//! - book-api init [--config <path>] [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Book Management API server
#[derive(Parser, Debug)]
#[command(name = "book-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Create the database file and books table, then exit
    Init {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// SQLite database file (overrides the config file)
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
