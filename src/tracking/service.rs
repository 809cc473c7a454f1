//! # Tracking Service
//!
//! Day registration, per-user yearly history, the yearly leaderboard and
//! yesterday's participants.

use std::sync::Arc;

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

use super::day::{DateRange, DayRepository, RegisteredDay};
use super::errors::{TrackingError, TrackingResult};
use super::leaderboard::{sort_rows, SortKey};
use crate::api::{DayRegisterRequest, LeaderboardRow, UserDaysResponse};
use crate::auth::UserRepository;

/// Today's date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct TrackingService {
    users: Arc<dyn UserRepository>,
    days: Arc<dyn DayRepository>,
}

impl TrackingService {
    pub fn new(users: Arc<dyn UserRepository>, days: Arc<dyn DayRepository>) -> Self {
        Self { users, days }
    }

    /// Record (or overwrite) the caller's level for a date
    ///
    /// Dates in a year after the current one are refused; dates later in
    /// the current year are accepted.
    pub async fn register_day(
        &self,
        user_id: Uuid,
        request: DayRegisterRequest,
    ) -> TrackingResult<()> {
        if request.date.year() > today().year() || request.level < 0 {
            return Err(TrackingError::InvalidData);
        }

        let day = RegisteredDay::new(user_id, request.date, request.level, request.comment);
        self.days.upsert_day(&day).await?;

        debug!(user_id = %user_id, date = %day.date, level = day.level, "Registered day");
        Ok(())
    }

    /// A user's recorded days for `year`, ordered by date
    pub async fn user_days(&self, user_id: Uuid, year: i32) -> TrackingResult<UserDaysResponse> {
        let range = DateRange::year(year).ok_or(TrackingError::InvalidData)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(TrackingError::UserNotFound)?;

        let days = self.days.days_in_range(user_id, range).await?;

        Ok(UserDaysResponse {
            user_id,
            display_name: user.display_name,
            days: days.iter().map(RegisteredDay::entry).collect(),
        })
    }

    /// Yearly leaderboard, ordered by `sort`
    pub async fn leaderboard(&self, year: i32, sort: SortKey) -> TrackingResult<Vec<LeaderboardRow>> {
        let range = DateRange::year(year).ok_or(TrackingError::InvalidData)?;
        let mut rows = self.days.participants_in_range(range).await?;
        // stores may tie-break by their own collation
        sort_rows(&mut rows, sort);

        info!(year, sort = %sort, participants = rows.len(), "Built leaderboard");
        Ok(rows)
    }

    /// Participants of yesterday, aggregated over that single day
    pub async fn yesterday_stats(&self) -> TrackingResult<Vec<LeaderboardRow>> {
        let yesterday = today() - Duration::days(1);
        let mut rows = self
            .days
            .participants_in_range(DateRange::day(yesterday))
            .await?;
        sort_rows(&mut rows, SortKey::DrinkDays);
        Ok(rows)
    }
}
