//! # Registered Days
//!
//! A user's level for one calendar date, and the repository that stores them.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::{DayEntry, LeaderboardRow};
use crate::storage::StorageResult;

/// A drink day is any day with a non-zero level
pub fn is_drink_level(level: i32) -> bool {
    level >= 1
}

/// One `(user, date)` entry; re-registering the same date replaces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredDay {
    pub registered_day_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub level: i32,
    pub comment: Option<String>,
}

impl RegisteredDay {
    pub fn new(user_id: Uuid, date: NaiveDate, level: i32, comment: Option<String>) -> Self {
        Self {
            registered_day_id: Uuid::new_v4(),
            user_id,
            date,
            level,
            comment,
        }
    }

    pub fn entry(&self) -> DayEntry {
        DayEntry {
            date: self.date,
            level: self.level,
            comment: self.comment.clone(),
        }
    }
}

/// Half-open date interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// January 1st of `year` up to January 1st of the next year.
    /// `None` when the year is outside chrono's supported range.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
        })
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date + Duration::days(1),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Day repository trait
#[async_trait]
pub trait DayRepository: Send + Sync {
    /// Insert the entry or overwrite level and comment of the existing
    /// entry for the same user and date
    async fn upsert_day(&self, day: &RegisteredDay) -> StorageResult<()>;

    /// A user's entries within `range`, ordered by date
    async fn days_in_range(&self, user_id: Uuid, range: DateRange)
        -> StorageResult<Vec<RegisteredDay>>;

    /// One row per user with at least one entry within `range`, ordered by
    /// drink days descending then display name
    async fn participants_in_range(&self, range: DateRange) -> StorageResult<Vec<LeaderboardRow>>;
}
