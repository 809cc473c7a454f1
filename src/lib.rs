//! drinkdays - social drink-day tracker
//!
//! The API server (accounts, daily levels, leaderboard), a typed client for
//! it, and the `drinkdays` command line that drives both.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod storage;
pub mod tracking;
