//! Wire types shared by the HTTP server and the API client
//!
//! Every body exchanged over the drinkdays HTTP API is defined here once,
//! so the server and the client cannot drift apart.

mod request;
mod response;

pub use request::{parse_day_date, CredentialsRequest, DayRegisterRequest, RegisterRequest};
pub use response::{
    DayEntry, ErrorBody, HealthResponse, LeaderboardRow, TokenResponse, UserDaysResponse,
    UserProfile,
};
