//! # drinkdays API Client
//!
//! HTTP client with one method per endpoint. Every request carries the
//! bearer token currently held by the shared [`TokenStore`], so a login
//! performed through one handle is seen by all others.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::errors::{ClientError, ClientResult};
use super::token_store::TokenStore;
use crate::api::{
    CredentialsRequest, DayRegisterRequest, ErrorBody, HealthResponse, LeaderboardRow,
    RegisterRequest, TokenResponse, UserDaysResponse, UserProfile,
};
use crate::tracking::SortKey;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the API (e.g., "http://localhost:6969")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6969".to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.tokens.load().is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("drinkdays/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored bearer token, if any
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, operation: &str) -> ClientResult<T> {
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        self.handle_response(response, operation).await
    }

    async fn post<B, T>(&self, path: &str, body: &B, operation: &str) -> ClientResult<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        self.handle_response(response, operation).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        operation: &str,
    ) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            let result = response.json::<T>().await?;
            debug!(operation, "Request succeeded");
            Ok(result)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text
                    }
                });

            warn!(operation, status = status.as_u16(), error = %message, "Request failed");
            Err(ClientError::api_error(status.as_u16(), message))
        }
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/health", "health").await
    }

    pub async fn login(&self, request: &CredentialsRequest) -> ClientResult<TokenResponse> {
        self.post("/login", request, "login").await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<UserProfile> {
        self.post("/register", request, "register").await
    }

    pub async fn account(&self) -> ClientResult<UserProfile> {
        self.get("/account", "account").await
    }

    pub async fn leaderboard(
        &self,
        year: i32,
        sort: Option<SortKey>,
    ) -> ClientResult<Vec<LeaderboardRow>> {
        let path = match sort {
            Some(key) => format!("/leaderboard/{}?sort={}", year, key),
            None => format!("/leaderboard/{}", year),
        };
        self.get(&path, "leaderboard").await
    }

    pub async fn yesterday_stats(&self) -> ClientResult<Vec<LeaderboardRow>> {
        self.get("/yesterday-stats", "yesterday stats").await
    }

    pub async fn user_days(&self, user_id: Uuid, year: i32) -> ClientResult<UserDaysResponse> {
        self.get(&format!("/user-days/{}/{}", user_id, year), "user days")
            .await
    }

    pub async fn register_day(&self, request: &DayRegisterRequest) -> ClientResult<bool> {
        self.post("/register-day", request, "register day").await
    }
}
