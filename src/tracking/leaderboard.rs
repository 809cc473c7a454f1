//! # Leaderboard
//!
//! Aggregation of registered days into participant rows, and the orderings
//! the leaderboard can be displayed in.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::day::is_drink_level;
use crate::api::LeaderboardRow;

/// Leaderboard ordering, always descending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DrinkDays,
    /// `drink_days / total_days`
    Average,
    TotalScore,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DrinkDays => "drink_days",
            SortKey::Average => "average",
            SortKey::TotalScore => "total_score",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drink_days" => Ok(SortKey::DrinkDays),
            "average" => Ok(SortKey::Average),
            "total_score" => Ok(SortKey::TotalScore),
            other => Err(format!(
                "unknown sort key '{}', expected drink_days, average or total_score",
                other
            )),
        }
    }
}

/// Share of registered days that were drink days; 0 with no registered days
pub fn average(row: &LeaderboardRow) -> f64 {
    if row.total_days == 0 {
        0.0
    } else {
        row.drink_days as f64 / row.total_days as f64
    }
}

fn compare(a: &LeaderboardRow, b: &LeaderboardRow, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::DrinkDays => b.drink_days.cmp(&a.drink_days),
        SortKey::Average => average(b).total_cmp(&average(a)),
        SortKey::TotalScore => b.total_score.cmp(&a.total_score),
    };

    primary.then_with(|| a.display_name.cmp(&b.display_name))
}

/// Sort rows descending by `key`, ties broken by display name
pub fn sort_rows(rows: &mut [LeaderboardRow], key: SortKey) {
    rows.sort_by(|a, b| compare(a, b, key));
}

/// Fold `(user_id, display_name, level)` entries into one row per user,
/// in the default leaderboard order
pub fn aggregate<'a, I>(entries: I) -> Vec<LeaderboardRow>
where
    I: IntoIterator<Item = (Uuid, &'a str, i32)>,
{
    let mut rows: HashMap<Uuid, LeaderboardRow> = HashMap::new();

    for (user_id, display_name, level) in entries {
        let row = rows.entry(user_id).or_insert_with(|| LeaderboardRow {
            user_id,
            display_name: display_name.to_string(),
            drink_days: 0,
            total_days: 0,
            total_score: 0,
        });

        row.total_days += 1;
        row.total_score += i64::from(level);
        if is_drink_level(level) {
            row.drink_days += 1;
        }
    }

    let mut rows: Vec<LeaderboardRow> = rows.into_values().collect();
    sort_rows(&mut rows, SortKey::DrinkDays);
    rows
}

/// Dashboard filter: participants with at least one drink day
pub fn champions(rows: &[LeaderboardRow]) -> Vec<LeaderboardRow> {
    rows.iter().filter(|row| row.drink_days > 0).cloned().collect()
}
