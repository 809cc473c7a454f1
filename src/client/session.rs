//! # Client Session
//!
//! Authentication state of a client and the route guard built on it.
//! The token is written to the [`TokenStore`] whenever it changes and
//! removed from it whenever the session falls back to logged-out.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::api::{ApiClient, ApiClientConfig};
use super::errors::{ClientError, ClientResult};
use super::token_store::TokenStore;
use crate::api::{CredentialsRequest, RegisterRequest, UserProfile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub logging_in: bool,
    pub loading: bool,
}

/// Client-side destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Leaderboard,
    UserProfile(Uuid),
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Leaderboard => write!(f, "/leaderboard"),
            Route::UserProfile(id) => write!(f, "/user/{}", id),
        }
    }
}

/// Registration form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Local checks done before contacting the server
    pub fn validate(&self) -> ClientResult<()> {
        if self.password != self.confirm_password {
            return Err(ClientError::PasswordMismatch);
        }
        Ok(())
    }

    fn request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

pub struct AuthSession {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    state: AuthState,
}

impl AuthSession {
    /// Session over an existing client; `tokens` must be the store the
    /// client reads its bearer token from
    pub fn new(api: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        let state = AuthState {
            token: tokens.load(),
            ..AuthState::default()
        };

        Self { api, tokens, state }
    }

    /// Build the client and the session around a shared token store
    pub fn connect(config: ApiClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let api = ApiClient::new(config, tokens.clone())?;
        Ok(Self::new(api, tokens))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    /// Whether the logged-in user may edit the calendar of `user_id`
    pub fn is_selectable(&self, user_id: Uuid) -> bool {
        self.user().map(|u| u.user_id == user_id).unwrap_or(false)
    }

    fn set_state(&mut self, state: AuthState) {
        let persisted = match state.token.as_deref() {
            Some(token) => self.tokens.save(token),
            None => self.tokens.clear(),
        };
        if let Err(e) = persisted {
            warn!(error = %e, "Failed to persist session token");
        }

        self.state = state;
    }

    /// Exchange credentials for a token and load the account
    ///
    /// Returns `false` on any failure, leaving the session logged out.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        self.set_state(AuthState {
            logging_in: true,
            ..AuthState::default()
        });

        let request = CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let token = match self.api.login(&request).await {
            Ok(response) => response.token,
            Err(e) => {
                debug!(error = %e, "Login refused");
                self.logout();
                return false;
            }
        };

        self.set_state(AuthState {
            token: Some(token),
            loading: true,
            ..AuthState::default()
        });

        match self.load_account().await {
            Ok(Some(user)) => {
                info!(username = %user.username, "Logged in");
                true
            }
            _ => false,
        }
    }

    pub fn logout(&mut self) {
        self.set_state(AuthState::default());
    }

    /// Fetch the profile for the current token
    ///
    /// Without a token this logs out and yields `None`; a refused token
    /// also logs out and returns the error.
    pub async fn load_account(&mut self) -> ClientResult<Option<UserProfile>> {
        let token = self.state.token.clone();

        let Some(token) = token else {
            self.logout();
            return Ok(None);
        };

        self.set_state(AuthState {
            token: Some(token.clone()),
            loading: true,
            ..AuthState::default()
        });

        match self.api.account().await {
            Ok(user) => {
                self.set_state(AuthState {
                    user: Some(user.clone()),
                    token: Some(token),
                    ..AuthState::default()
                });
                Ok(Some(user))
            }
            Err(e) => {
                warn!(error = %e, "Account check failed, logging out");
                self.logout();
                Err(e)
            }
        }
    }

    /// Resolve a navigation: protected routes wait for the account check
    /// and fall back to the login route when it fails
    pub async fn guard(&mut self, route: Route) -> Route {
        if !route.requires_auth() {
            return route;
        }

        match self.load_account().await {
            Ok(Some(_)) => route,
            _ => Route::Login,
        }
    }

    /// Create an account, then log into it
    ///
    /// A password mismatch is reported without any request; server errors
    /// come back with the server's message.
    pub async fn register(&mut self, form: &RegisterForm) -> ClientResult<UserProfile> {
        form.validate()?;

        let profile = self.api.register(&form.request()).await?;

        if !self.login(&form.username, &form.password).await {
            warn!(username = %form.username, "Registered but automatic login failed");
        }

        Ok(profile)
    }
}
