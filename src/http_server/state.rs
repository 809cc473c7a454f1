//! Shared handler state

use std::sync::Arc;

use crate::auth::{AccountService, JwtConfig, PasswordPolicy, UserRepository};
use crate::storage::MemoryStore;
use crate::tracking::{DayRepository, TrackingService};

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub tracking: Arc<TrackingService>,
}

impl AppState {
    /// Wire both services onto a single store implementing both repositories
    pub fn with_store<S>(store: Arc<S>, jwt_config: JwtConfig, policy: PasswordPolicy) -> Self
    where
        S: UserRepository + DayRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = store.clone();
        let days: Arc<dyn DayRepository> = store;

        Self {
            accounts: Arc::new(AccountService::new(users.clone(), jwt_config, policy)),
            tracking: Arc::new(TrackingService::new(users, days)),
        }
    }

    /// State backed by a fresh `MemoryStore`
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::with_store(
            Arc::new(MemoryStore::new()),
            jwt_config,
            PasswordPolicy::default(),
        )
    }
}
