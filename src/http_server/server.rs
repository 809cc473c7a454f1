//! # HTTP Server
//!
//! Combines the public, protected and health routers into one axum app.

use std::net::SocketAddr;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::account_routes;
use super::config::HttpServerConfig;
use super::middleware::require_active_user;
use super::observability_routes::health_routes;
use super::state::AppState;
use super::tracking_routes::tracking_routes;

/// Build the full application router
pub fn build_router(state: AppState, config: &HttpServerConfig) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let protected = Router::new()
        .merge(account_routes::protected_routes())
        .merge(tracking_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_active_user,
        ));

    Router::new()
        .merge(health_routes())
        .merge(account_routes::public_routes())
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// HTTP server for the drinkdays API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        let router = build_router(state, &config);
        Self { config, router }
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C / SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        self.run(listener).await
    }

    /// Serve on an already bound listener
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        info!(addr = %listener.local_addr()?, "drinkdays API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;

    #[test]
    fn test_server_socket_addr() {
        let server = HttpServer::new(
            HttpServerConfig::with_port(8080),
            AppState::in_memory(JwtConfig::default()),
        );
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_cors_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:4200".to_string()],
            ..HttpServerConfig::default()
        };
        let _router = build_router(AppState::in_memory(JwtConfig::default()), &config);
    }
}
