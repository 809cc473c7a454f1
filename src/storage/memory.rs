//! In-memory store
//!
//! Implements both repositories behind `RwLock`s. Used by the test suites
//! and by `serve` when no database is configured; nothing survives a restart.

use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{StorageError, StorageResult};
use crate::api::LeaderboardRow;
use crate::auth::{User, UserRepository};
use crate::tracking::leaderboard::aggregate;
use crate::tracking::{DateRange, DayRepository, RegisteredDay};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    days: RwLock<Vec<RegisteredDay>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> StorageResult<Option<User>> {
        let users = self.users.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().map_err(|_| StorageError::LockPoisoned)?;
        let wanted = username.to_lowercase();
        Ok(users
            .iter()
            .find(|u| u.username.to_lowercase() == wanted)
            .cloned())
    }

    async fn create(&self, user: &User) -> StorageResult<()> {
        let mut users = self.users.write().map_err(|_| StorageError::LockPoisoned)?;

        let wanted = user.username.to_lowercase();
        if users.iter().any(|u| u.username.to_lowercase() == wanted) {
            return Err(StorageError::Conflict(format!(
                "username '{}' already taken",
                user.username
            )));
        }

        users.push(user.clone());
        Ok(())
    }
}

#[async_trait]
impl DayRepository for MemoryStore {
    async fn upsert_day(&self, day: &RegisteredDay) -> StorageResult<()> {
        let mut days = self.days.write().map_err(|_| StorageError::LockPoisoned)?;

        match days
            .iter_mut()
            .find(|d| d.user_id == day.user_id && d.date == day.date)
        {
            Some(existing) => {
                existing.level = day.level;
                existing.comment = day.comment.clone();
            }
            None => days.push(day.clone()),
        }

        Ok(())
    }

    async fn days_in_range(
        &self,
        user_id: Uuid,
        range: DateRange,
    ) -> StorageResult<Vec<RegisteredDay>> {
        let days = self.days.read().map_err(|_| StorageError::LockPoisoned)?;

        let mut found: Vec<RegisteredDay> = days
            .iter()
            .filter(|d| d.user_id == user_id && range.contains(d.date))
            .cloned()
            .collect();
        found.sort_by_key(|d| d.date);

        Ok(found)
    }

    async fn participants_in_range(&self, range: DateRange) -> StorageResult<Vec<LeaderboardRow>> {
        let users = self.users.read().map_err(|_| StorageError::LockPoisoned)?;
        let days = self.days.read().map_err(|_| StorageError::LockPoisoned)?;

        // inner join: entries of unknown users are skipped
        let entries = days.iter().filter(|d| range.contains(d.date)).filter_map(|d| {
            users
                .iter()
                .find(|u| u.user_id == d.user_id)
                .map(|u| (u.user_id, u.display_name.as_str(), d.level))
        });

        Ok(aggregate(entries))
    }
}
