//! # Tracking Module
//!
//! Daily drink levels, the yearly leaderboard and yesterday's stats.

pub mod day;
pub mod errors;
pub mod leaderboard;
pub mod service;

pub use day::{DateRange, DayRepository, RegisteredDay};
pub use errors::{TrackingError, TrackingResult};
pub use leaderboard::{champions, sort_rows, SortKey};
pub use service::{today, TrackingService};
