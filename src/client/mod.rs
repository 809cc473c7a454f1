//! # drinkdays Client
//!
//! Typed access to the API plus the client-side behaviour around it:
//! token persistence, login state, the route guard, and the calendar grid.

pub mod api;
pub mod calendar;
pub mod errors;
pub mod session;
pub mod token_store;

pub use api::{ApiClient, ApiClientConfig};
pub use calendar::{build_year, CalendarDay, Month, Week, YearCalendar};
pub use errors::{ClientError, ClientResult};
pub use session::{AuthSession, AuthState, RegisterForm, Route};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
