//! Tracking HTTP Routes
//!
//! Leaderboard, yesterday's stats, a user's yearly days and day
//! registration. All of them require a bearer token.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Json, Path, Query, State,
    },
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::error::ApiError;
use super::state::AppState;
use crate::api::{DayRegisterRequest, LeaderboardRow, UserDaysResponse};
use crate::auth::UserClaims;
use crate::tracking::SortKey;

pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard/:year", get(leaderboard_handler))
        .route("/yesterday-stats", get(yesterday_stats_handler))
        .route("/user-days/:user_id/:year", get(user_days_handler))
        .route("/register-day", post(register_day_handler))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub sort: Option<SortKey>,
}

async fn leaderboard_handler(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Vec<LeaderboardRow>>, ApiError> {
    let Path(year) = path?;
    let Query(query) = query?;
    let sort = query.sort.unwrap_or_default();
    Ok(Json(state.tracking.leaderboard(year, sort).await?))
}

async fn yesterday_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardRow>>, ApiError> {
    Ok(Json(state.tracking.yesterday_stats().await?))
}

async fn user_days_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, i32)>, PathRejection>,
) -> Result<Json<UserDaysResponse>, ApiError> {
    let Path((user_id, year)) = path?;
    Ok(Json(state.tracking.user_days(user_id, year).await?))
}

async fn register_day_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
    payload: Result<Json<DayRegisterRequest>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
    let Json(request) = payload?;
    let user_id = claims.user_id()?;
    state.tracking.register_day(user_id, request).await?;
    Ok(Json(true))
}
