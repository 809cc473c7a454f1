//! # HTTP Server Module
//!
//! The drinkdays JSON API.
//!
//! # Endpoints
//!
//! - `POST /login`, `POST /register` - public
//! - `GET /account` - the caller's profile
//! - `GET /leaderboard/:year` - yearly ranking, optional `?sort=`
//! - `GET /yesterday-stats` - yesterday's participants
//! - `GET /user-days/:user_id/:year` - a user's recorded days
//! - `POST /register-day` - record the caller's level for a date
//! - `GET /health` - health check

pub mod account_routes;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability_routes;
pub mod server;
pub mod state;
pub mod tracking_routes;

pub use config::HttpServerConfig;
pub use error::ApiError;
pub use server::{build_router, HttpServer};
pub use state::AppState;
