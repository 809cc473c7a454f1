//! CLI argument definitions using clap
//!
//! Commands:
//! - drinkdays serve --config <path>
//! - drinkdays register | login | logout | whoami
//! - drinkdays dashboard | leaderboard | calendar | mark-day

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::tracking::SortKey;

/// drinkdays - social drink-day tracker
#[derive(Parser, Debug)]
#[command(name = "drinkdays")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the API for client commands
    #[arg(long, global = true, default_value = "http://localhost:6969")]
    pub api_url: String,

    /// File holding the session token between client commands
    #[arg(long, global = true, default_value = "./.drinkdays-session")]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./drinkdays.json")]
        config: PathBuf,
    },

    /// Create an account and log into it
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        display_name: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Log in and keep the token in the session file
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored token
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Yesterday's champions
    Dashboard,

    /// Yearly leaderboard
    Leaderboard {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        #[arg(long, default_value = "drink_days")]
        sort: SortKey,
    },

    /// A user's calendar for a year
    Calendar {
        /// Defaults to the logged-in user
        #[arg(long)]
        user: Option<Uuid>,

        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },

    /// Set your level for a date, then show the updated calendar
    MarkDay {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        level: i32,

        #[arg(long)]
        comment: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
