//! Storage backends for users and registered days
//!
//! - `MemoryStore`: process-local, for tests and development
//! - `PgStore`: PostgreSQL through sqlx

mod errors;
mod memory;
mod postgres;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
