//! drinkdays CLI entry point
//!
//! Parsing and dispatch live in the `cli` module; this only reports
//! errors on stderr and exits non-zero on failure.

use drinkdays::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
