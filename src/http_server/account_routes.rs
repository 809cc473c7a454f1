//! Account HTTP Routes
//!
//! `/register` and `/login` are public; `/account` sits behind the bearer
//! token guard.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json, State},
    routing::{get, post},
    Router,
};

use super::error::ApiError;
use super::state::AppState;
use crate::api::{CredentialsRequest, RegisterRequest, TokenResponse, UserProfile};
use crate::auth::UserClaims;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
}

/// Routes requiring a valid bearer token
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/account", get(account_handler))
}

async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.accounts.login(request).await?))
}

async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(state.accounts.register(request).await?))
}

async fn account_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<UserClaims>,
) -> Result<Json<UserProfile>, ApiError> {
    let user_id = claims.user_id()?;
    Ok(Json(state.accounts.account(user_id).await?))
}
