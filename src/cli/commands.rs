//! CLI command implementations
//!
//! `serve` boots the API. Every other command is a thin client over the
//! same API, keeping its token in the session file between invocations.

use std::path::Path;
use std::sync::Arc;

use chrono::Datelike;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{parse_day_date, DayRegisterRequest, UserProfile};
use crate::client::{
    build_year, ApiClientConfig, AuthSession, ClientError, FileTokenStore, RegisterForm, Route,
    TokenStore,
};
use crate::config::AppConfig;
use crate::http_server::{AppState, HttpServer};
use crate::logging::init_logging;
use crate::storage::{MemoryStore, PgStore};
use crate::tracking::{champions, today, SortKey};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::render;

/// Filter for client commands unless `RUST_LOG` says otherwise
const CLIENT_LOG_FILTER: &str = "warn";

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let Cli {
        api_url,
        session_file,
        command,
    } = cli;

    if let Command::Serve { config } = &command {
        return serve(config);
    }

    let filter = std::env::var("RUST_LOG").ok();
    init_logging(Some(filter.as_deref().unwrap_or(CLIENT_LOG_FILTER)));

    let rt = new_runtime()?;
    rt.block_on(async {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(session_file));
        let config = ApiClientConfig {
            base_url: api_url,
            ..ApiClientConfig::default()
        };
        let mut session = AuthSession::connect(config, tokens)?;
        run_client_command(&mut session, command).await
    })
}

fn new_runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Load configuration, open storage and serve until shutdown
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    init_logging(config.log_level.as_deref());

    let rt = new_runtime()?;
    rt.block_on(serve_async(config))
}

async fn serve_async(config: AppConfig) -> CliResult<()> {
    let jwt_config = config.auth.jwt_config()?;
    let policy = config.auth.password_policy();

    if config.auth.uses_default_secret() {
        warn!("Signing tokens with the built-in development secret; set APP_SECRET");
    }

    let state = match &config.database.url {
        Some(url) => {
            let store = PgStore::connect(url, config.database.max_connections).await?;
            store.migrate().await?;
            AppState::with_store(Arc::new(store), jwt_config, policy)
        }
        None => {
            warn!("No database configured, data lives in memory and is lost on exit");
            AppState::with_store(Arc::new(MemoryStore::new()), jwt_config, policy)
        }
    };

    HttpServer::new(config.server.clone(), state)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

async fn run_client_command(session: &mut AuthSession, command: Command) -> CliResult<()> {
    match command {
        Command::Serve { .. } => Ok(()),
        Command::Register {
            username,
            display_name,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                username,
                display_name,
                password,
                confirm_password,
            };
            register(session, &form).await
        }
        Command::Login { username, password } => login(session, &username, &password).await,
        Command::Logout => {
            session.logout();
            render::write_output("Logged out.")
        }
        Command::Whoami => {
            let me = require_login(session, Route::Dashboard).await?;
            render::write_output(&render::profile(&me))
        }
        Command::Dashboard => dashboard(session).await,
        Command::Leaderboard { year, sort } => leaderboard(session, year, sort).await,
        Command::Calendar { user, year } => calendar(session, user, year).await,
        Command::MarkDay {
            date,
            level,
            comment,
        } => mark_day(session, &date, level, comment).await,
    }
}

/// Run the route guard; a redirect to the login route becomes an error
async fn require_login(session: &mut AuthSession, route: Route) -> CliResult<UserProfile> {
    let resolved = session.guard(route).await;
    if resolved == Route::Login {
        info!(requested = %route, redirect = %resolved, "Not authenticated");
        return Err(ClientError::NotAuthenticated.into());
    }

    session
        .user()
        .cloned()
        .ok_or_else(|| ClientError::NotAuthenticated.into())
}

async fn register(session: &mut AuthSession, form: &RegisterForm) -> CliResult<()> {
    let profile = session.register(form).await?;

    let mut text = format!("Registered {}.\n", profile.username);
    if session.user().is_some() {
        text.push_str(&render::profile(&profile));
    } else {
        text.push_str("Automatic login failed, run 'drinkdays login'.\n");
    }
    render::write_output(&text)
}

async fn login(session: &mut AuthSession, username: &str, password: &str) -> CliResult<()> {
    if !session.login(username, password).await {
        return Err(CliError::request_failed("Login failed: invalid credentials"));
    }

    match session.user() {
        Some(user) => render::write_output(&format!("Logged in as {}", user.display_name)),
        None => Err(ClientError::NotAuthenticated.into()),
    }
}

async fn dashboard(session: &mut AuthSession) -> CliResult<()> {
    require_login(session, Route::Dashboard).await?;

    let rows = session.api().yesterday_stats().await?;
    render::write_output(&render::leaderboard(
        "Yesterday's champions",
        &champions(&rows),
    ))
}

async fn leaderboard(session: &mut AuthSession, year: Option<i32>, sort: SortKey) -> CliResult<()> {
    require_login(session, Route::Leaderboard).await?;

    let year = year.unwrap_or_else(|| today().year());
    let rows = session.api().leaderboard(year, Some(sort)).await?;
    render::write_output(&render::leaderboard(
        &format!("Leaderboard {} (by {})", year, sort),
        &rows,
    ))
}

async fn calendar(session: &mut AuthSession, user: Option<Uuid>, year: Option<i32>) -> CliResult<()> {
    let route = user.map(Route::UserProfile).unwrap_or(Route::Dashboard);
    let me = require_login(session, route).await?;

    let user_id = user.unwrap_or(me.user_id);
    let year = year.unwrap_or_else(|| today().year());

    let days = session.api().user_days(user_id, year).await?;
    let grid = build_year(year, &days.days)
        .ok_or_else(|| CliError::invalid_input(format!("Year {} is out of range", year)))?;

    let mut text = render::calendar(&days.display_name, &grid);
    if session.is_selectable(user_id) {
        text.push_str("\nThis is your calendar; change a day with 'drinkdays mark-day'.\n");
    }
    render::write_output(&text)
}

async fn mark_day(
    session: &mut AuthSession,
    date: &str,
    level: i32,
    comment: Option<String>,
) -> CliResult<()> {
    let date = parse_day_date(date)
        .ok_or_else(|| CliError::invalid_input(format!("Invalid date '{}'", date)))?;
    let me = require_login(session, Route::Dashboard).await?;

    let request = DayRegisterRequest {
        date,
        level,
        comment,
    };
    session.api().register_day(&request).await?;

    // reload so the output reflects what the server stored
    let days = session.api().user_days(me.user_id, date.year()).await?;
    let grid = build_year(date.year(), &days.days).ok_or_else(|| {
        CliError::invalid_input(format!("Year {} is out of range", date.year()))
    })?;

    let stored = grid.day(date).and_then(|day| day.level);
    let mut text = match stored {
        Some(level) => format!("{}: level {}\n\n", date.format("%Y-%m-%d"), level),
        None => format!("{}: not recorded\n\n", date.format("%Y-%m-%d")),
    };
    text.push_str(&render::calendar(&days.display_name, &grid));
    render::write_output(&text)
}
