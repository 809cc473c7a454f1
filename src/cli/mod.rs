//! CLI module for drinkdays
//!
//! - serve: run the API server
//! - register, login, logout, whoami: account and session handling
//! - dashboard, leaderboard, calendar, mark-day: tracking views

mod args;
mod commands;
mod errors;
mod render;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
