use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use beacon_server::{Relay, RelayCommand, ServerConfig, SignalingService, ws_handler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(ServerConfig::parse());
    info!(?config, "starting signaling relay");

    let (relay_tx, relay_rx) = mpsc::channel(256);
    let relay = Relay::new(Arc::clone(&config), relay_rx);
    let relay_task = tokio::spawn(relay.run());

    let service = SignalingService::new(relay_tx.clone(), Arc::clone(&config));

    let app = Router::new()
        .route("/", get(ws_handler))
        .route("/{code}", get(ws_handler))
        .with_state(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(relay_tx))
        .await
        .context("server error")?;

    relay_task.await.ok();
    Ok(())
}

/// Resolves on SIGINT. Tells the relay to close every connection so the
/// server exits without a drain period.
async fn shutdown_signal(relay_tx: mpsc::Sender<RelayCommand>) {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
    let _ = relay_tx.send(RelayCommand::Shutdown).await;
}
