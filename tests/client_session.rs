//! Client Session Tests
//!
//! Runs the real server on an ephemeral port and exercises the client side
//! over HTTP: login state, token persistence, the route guard, registration
//! and the calendar round trip.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use tempfile::TempDir;
use tokio::net::TcpListener;

use drinkdays::api::DayRegisterRequest;
use drinkdays::auth::JwtConfig;
use drinkdays::client::{
    build_year, ApiClientConfig, AuthSession, AuthState, ClientError, FileTokenStore,
    MemoryTokenStore, RegisterForm, Route, TokenStore,
};
use drinkdays::http_server::{AppState, HttpServer, HttpServerConfig};
use drinkdays::tracking::{champions, today, SortKey};

// =============================================================================
// Test Utilities
// =============================================================================

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(
        HttpServerConfig::default(),
        AppState::in_memory(JwtConfig::default()),
    );
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    format!("http://{}", addr)
}

fn session(base_url: &str, tokens: Arc<dyn TokenStore>) -> AuthSession {
    let config = ApiClientConfig {
        base_url: base_url.to_string(),
        ..ApiClientConfig::default()
    };
    AuthSession::connect(config, tokens).unwrap()
}

fn memory_session(base_url: &str) -> AuthSession {
    session(base_url, Arc::new(MemoryTokenStore::new()))
}

fn form(username: &str, display_name: &str, password: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        username: username.to_string(),
        display_name: display_name.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    }
}

async fn signed_up(base_url: &str, username: &str, display_name: &str) -> AuthSession {
    let mut session = memory_session(base_url);
    session
        .register(&form(username, display_name, "pw", "pw"))
        .await
        .unwrap();
    assert!(session.user().is_some());
    session
}

// =============================================================================
// Login / Logout
// =============================================================================

#[tokio::test]
async fn test_login_success_sets_user_and_token() {
    let url = spawn_server().await;
    signed_up(&url, "alice", "Alice").await;

    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = session(&url, tokens.clone());

    assert!(session.login("alice", "pw").await);
    assert_eq!(session.user().unwrap().username, "alice");
    assert!(!session.state().logging_in);
    assert!(!session.state().loading);
    assert_eq!(tokens.load().as_deref(), session.token());
}

#[tokio::test]
async fn test_login_failure_leaves_session_empty() {
    let url = spawn_server().await;
    signed_up(&url, "alice", "Alice").await;

    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let mut session = session(&url, tokens.clone());

    assert!(!session.login("alice", "wrong").await);
    assert_eq!(session.state(), &AuthState::default());
    assert!(tokens.load().is_none());
}

#[tokio::test]
async fn test_logout_clears_persisted_token() {
    let url = spawn_server().await;
    signed_up(&url, "alice", "Alice").await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session");
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&path));

    let mut session = session(&url, tokens.clone());
    assert!(session.login("alice", "pw").await);
    assert!(path.exists());

    // a new process picks the token up from the file
    let mut restored = session_from_file(&url, &path);
    assert!(restored.token().is_some());
    assert_eq!(restored.guard(Route::Dashboard).await, Route::Dashboard);
    assert_eq!(restored.user().unwrap().username, "alice");

    session.logout();
    assert!(session.token().is_none());
    assert!(session.user().is_none());
    assert!(tokens.load().is_none());
    assert!(!path.exists());
}

fn session_from_file(url: &str, path: &std::path::Path) -> AuthSession {
    session(url, Arc::new(FileTokenStore::new(path)))
}

// =============================================================================
// Route Guard
// =============================================================================

#[tokio::test]
async fn test_guard_redirects_without_valid_token() {
    let url = spawn_server().await;

    let mut session = memory_session(&url);
    assert_eq!(session.guard(Route::Leaderboard).await, Route::Login);
    assert_eq!(session.guard(Route::Register).await, Route::Register);

    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    tokens.save("stale.token.value").unwrap();
    let mut session = self::session(&url, tokens.clone());

    assert_eq!(session.guard(Route::Dashboard).await, Route::Login);
    assert!(session.token().is_none());
    assert!(tokens.load().is_none());
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_password_mismatch() {
    let url = spawn_server().await;
    let mut session = memory_session(&url);

    let err = session
        .register(&form("bob", "Bob", "one", "two"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::PasswordMismatch));

    // nothing was created
    assert!(!session.login("bob", "one").await);
}

#[tokio::test]
async fn test_register_reports_server_message() {
    let url = spawn_server().await;
    signed_up(&url, "alice", "Alice").await;

    let mut session = memory_session(&url);
    let err = session
        .register(&form("alice", "Impostor", "pw", "pw"))
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "User already exists");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(session.user().is_none());
}

#[tokio::test]
async fn test_register_logs_in() {
    let url = spawn_server().await;
    let mut session = memory_session(&url);

    let profile = session
        .register(&form("carol", "Carol", "pw", "pw"))
        .await
        .unwrap();

    assert_eq!(session.user(), Some(&profile));
    assert!(session.token().is_some());
    assert!(session.is_selectable(profile.user_id));
}

// =============================================================================
// Tracking
// =============================================================================

#[tokio::test]
async fn test_mark_day_then_reload_calendar() {
    let url = spawn_server().await;
    let session = signed_up(&url, "alice", "Alice").await;
    let me = session.user().unwrap().clone();

    let date = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
    let request = DayRegisterRequest {
        date,
        level: 3,
        comment: Some("party".to_string()),
    };
    assert!(session.api().register_day(&request).await.unwrap());

    let days = session.api().user_days(me.user_id, 2023).await.unwrap();
    let grid = build_year(2023, &days.days).unwrap();

    let cell = grid.day(date).unwrap();
    assert_eq!(cell.level, Some(3));
    assert_eq!(cell.comment.as_deref(), Some("party"));
    assert_eq!(grid.recorded_days(), 1);
}

#[tokio::test]
async fn test_register_day_error_surfaces() {
    let url = spawn_server().await;
    let session = signed_up(&url, "alice", "Alice").await;

    let request = DayRegisterRequest {
        date: NaiveDate::from_ymd_opt(today().year() + 1, 1, 1).unwrap(),
        level: 1,
        comment: None,
    };
    let err = session.api().register_day(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));
}

#[tokio::test]
async fn test_leaderboard_sort_and_champions() {
    let url = spawn_server().await;
    let alice = signed_up(&url, "alice", "Alice").await;
    let bob = signed_up(&url, "bob", "Bob").await;

    let day = |y, m, d, level| DayRegisterRequest {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        level,
        comment: None,
    };

    alice.api().register_day(&day(2023, 5, 1, 1)).await.unwrap();
    alice.api().register_day(&day(2023, 5, 2, 0)).await.unwrap();
    bob.api().register_day(&day(2023, 5, 1, 6)).await.unwrap();

    let rows = alice.api().leaderboard(2023, None).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob"]);

    let rows = alice
        .api()
        .leaderboard(2023, Some(SortKey::TotalScore))
        .await
        .unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, ["Bob", "Alice"]);

    let yesterday = today() - Duration::days(1);
    let (y, m, d) = (yesterday.year(), yesterday.month(), yesterday.day());
    alice.api().register_day(&day(y, m, d, 2)).await.unwrap();
    bob.api().register_day(&day(y, m, d, 0)).await.unwrap();

    let stats = bob.api().yesterday_stats().await.unwrap();
    assert_eq!(stats.len(), 2);

    let winners = champions(&stats);
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].display_name, "Alice");
}
