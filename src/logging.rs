//! # Structured Logging
//!
//! One-time `tracing` subscriber setup shared by the server and the CLI.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Default filter when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Initialize console logging with the given filter directive
///
/// Later calls are no-ops, and an already installed global subscriber
/// (e.g. from a test harness) is left in place.
pub fn init_logging(filter: Option<&str>) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = filter.unwrap_or(DEFAULT_FILTER);
        let env_filter =
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(Some("debug"));
        init_logging(Some("not a [valid filter"));
        tracing::info!("logging initialized twice without panicking");
    }
}
