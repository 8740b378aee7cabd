use clap::Parser;
use std::sync::Arc;
use tracing::info;

use call_quality_dashboard::config::{CliArgs, DashboardConfig};
use call_quality_dashboard::refresher;
use call_quality_dashboard::server;
use call_quality_dashboard::state::{DashboardState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "call_quality_dashboard=info,tower_http=info".into()),
        )
        .init();

    let args = CliArgs::parse();
    info!("Starting call-quality-dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("Refresh interval: {}s", args.refresh_secs);
    info!("Simulation delay: {}ms", args.simulation_delay_ms);
    match args.seed {
        Some(seed) => info!("Generators seeded with {}", seed),
        None => info!("Generators unseeded"),
    }

    let config = DashboardConfig::from_args(args);
    let addr = config.socket_addr();

    let state = Arc::new(DashboardState::new(config));

    // Spawn refresh background task; first tick populates the snapshot
    let refresher_handle = refresher::spawn_refresher(state.clone());

    // Build and start HTTP server
    let router = server::build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await?;

    info!("Dashboard shutting down");
    let _ = refresher_handle.await;

    Ok(())
}

async fn shutdown_signal(state: SharedState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Received shutdown signal");
    state.request_shutdown();
}
