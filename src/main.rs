//! book-api entry point
//!
//! Parses CLI arguments, dispatches to the selected command, prints any
//! error to stderr and exits non-zero on failure. All logic lives in the
//! CLI module.

use book_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
