//! nocyril - deletes Cyrillic comments from monitored VK communities.
//!
//! Listens for VK Callback API events, answers them immediately and checks
//! new, edited and restored comments in the background.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nocyril::{router, AppState, Config, GroupRegistry, ModerationQueue, PlatformApi, VkClient};

/// VK callback moderation server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// host:port to listen on
    #[arg(short, long, default_value = "127.0.0.1:8081")]
    listen: SocketAddr,

    /// Path to config file
    #[arg(short, long = "conf", default_value = "nocyril.toml")]
    conf: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    let args = Args::parse();

    info!(listen = %args.listen, conf = %args.conf.display(), "nocyril_starting");

    let config = Config::from_file(&args.conf).context("Failed to load config")?;
    info!(
        groups = config.groups.len(),
        api_version = %config.api.version,
        timeout_ms = config.api.timeout_ms,
        "config_loaded"
    );

    let api: Arc<dyn PlatformApi> = Arc::new(
        VkClient::new(config.vk_token.clone(), &config.api)
            .context("Failed to build VK client")?,
    );

    let registry = GroupRegistry::new(config.groups);
    let (queue, worker) = ModerationQueue::spawn(api);
    let app = router(AppState::new(registry, queue));

    let listener = TcpListener::bind(args.listen)
        .await
        .context("Failed to bind to address")?;

    info!(address = %args.listen, "web_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router owned the last queue handle; the worker exits once it has
    // spawned whatever was still queued.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "moderation_worker_failed");
    }

    info!("nocyril_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
