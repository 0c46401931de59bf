//! runroute server - route generation backend for the map UI

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runroute_server::{api, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("runroute_server=debug".parse()?))
        .init();

    tracing::info!("Starting route server...");

    let config = Config::from_env().context("Invalid configuration")?;
    let port = config.server_port;
    tracing::info!(
        "Routing API: {} (cache {})",
        config.route_api,
        if config.enable_cache { "enabled" } else { "disabled" }
    );

    let state = Arc::new(AppState::new(config).context("Failed to create routing client")?);

    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
