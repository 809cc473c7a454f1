//! Response bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public view of an account, returned by `/account` and `/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// `POST /login` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,

    /// Token lifetime in seconds
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

/// One participant of a leaderboard or of yesterday's stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub drink_days: i64,
    pub total_days: i64,
    pub total_score: i64,
}

/// A recorded day as exposed by `/user-days`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub level: i32,
    pub comment: Option<String>,
}

/// `GET /user-days/:user_id/:year`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDaysResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub days: Vec<DayEntry>,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
