use std::net::SocketAddr;
use std::sync::Arc;

mod app;
mod auth;
mod config;
mod error;
mod handlers;
mod response;
mod store;

use app::build_router;
use auth::services::AuthService;
use config::Config;
use store::{RecordStore, Table};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Règles par défaut si RUST_LOG n'est pas défini
        tracing_subscriber::EnvFilter::new(
            "info,signup_audit=debug,hyper_util=warn,tower_http=info",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    tracing::info!("Starting signup-audit...");

    let config = Config::from_env()?;
    tracing::info!(environment = config.environment.as_str(), "configuration ready");

    let store = Arc::new(RecordStore::new(&config.users_file, &config.audit_file));
    for table in Table::ALL {
        // Not fatal: requests touching a broken table report the error themselves
        if let Err(e) = store.initialize(table) {
            tracing::error!(%table, error = %e, "could not initialize table");
        }
    }

    let service = Arc::new(AuthService::new(store));
    let app = build_router(service, &config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server running at http://{addr}");
    tracing::info!("   Signup page: http://{addr}/signup.html");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
