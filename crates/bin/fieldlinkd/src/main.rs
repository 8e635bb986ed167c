//! # fieldlinkd — fieldlink daemon
//!
//! Composition root that wires all adapters together and starts the servers.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the in-memory stores (adapters)
//! - Construct application services, injecting stores via port traits
//! - Build one axum router per enabled service
//! - Bind each to its TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use fieldlink_adapter_http_axum::router;
use fieldlink_adapter_http_axum::state::{HarnessState, PairingState};
use fieldlink_adapter_storage_memory::{InMemoryDeviceRepository, InMemoryRequestLog};
use fieldlink_app::services::pairing_service::PairingService;
use fieldlink_app::services::request_log_service::RequestLogService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let mut servers = JoinSet::new();

    if config.pairing.enabled {
        let state = PairingState::new(PairingService::new(InMemoryDeviceRepository::new()));
        let app = router::pairing(state, config.pairing.body_limit_bytes);
        let addr = config.pairing_addr();
        tracing::info!(
            register = %format!("http://{addr}/api/register"),
            data = %format!("http://{addr}/api/data"),
            "pairing endpoints"
        );
        servers.spawn(serve("pairing", addr, app));
    }

    if config.harness.enabled {
        let log = InMemoryRequestLog::with_capacity(config.harness.capacity);
        let state = HarnessState::new(RequestLogService::new(log), config.harness.refresh_seconds);
        let app = router::harness(state);
        let addr = config.harness_addr();
        tracing::info!(dashboard = %format!("http://{addr}/"), "harness endpoints");
        servers.spawn(serve("harness", addr, app));
    }

    while let Some(joined) = servers.join_next().await {
        joined??;
    }

    tracing::info!("fieldlinkd stopped");
    Ok(())
}

async fn serve(name: &'static str, addr: String, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(service = name, "listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(name))
    .await
}

async fn shutdown_signal(name: &'static str) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!(service = name, "shutting down");
}
