//! Tally API Server
//!
//! Main entry point for the Tally backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_core::expense::ExpenseService;
use tally_db::{ExpenseRepository, UserRepository, connect};
use tally_shared::{AppConfig, JwtConfig, JwtService};

/// Installs the global subscriber. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

/// Resolves on Ctrl+C or SIGTERM, whichever comes first.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
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
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    let db = Arc::new(connect(&config.database).await?);
    info!("Connected to database");

    let policy = config.expenses.update_policy;
    if policy.is_legacy() {
        warn!(
            update_policy = %policy,
            "Legacy update policy active: zero amounts and empty descriptions in updates are ignored"
        );
    }

    let state = AppState {
        users: Arc::new(UserRepository::new(db.clone())),
        expenses: ExpenseService::new(Arc::new(ExpenseRepository::new(db.clone())), policy),
        jwt_service: Arc::new(JwtService::new(JwtConfig::from(&config.jwt))),
    };

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the other handles and is gone once serve returns.
    match Arc::try_unwrap(db) {
        Ok(db) => {
            db.close().await?;
            info!("Database connection closed");
        }
        Err(_) => warn!("Database pool still shared at shutdown; dropping without close"),
    }

    Ok(())
}
