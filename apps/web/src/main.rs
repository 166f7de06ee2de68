mod backend_client;
mod config;
mod errors;
mod landing;
mod models;
mod routes;
mod state;
mod widget;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::BackendClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level is known
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.log_level
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerFlow web v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(&config)?;
    info!(
        "Backend client initialized (base url: {}, timeout: {}s, retries: {})",
        backend.base_url(),
        config.backend_timeout.as_secs(),
        config.backend_max_retries
    );

    let state = AppState::new(config.clone(), Arc::new(backend));
    state
        .sessions
        .spawn_pruner(config.session_ttl.max(Duration::from_secs(60)));

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
