//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use fieldlink_app::ports::{DeviceRepository, RequestLogStore};

use crate::state::{HarnessState, PairingState};

/// Body size limit applied by [`pairing`] when none is configured.
pub const PAIRING_BODY_LIMIT: usize = 10 * 1024;

/// Build the pairing service [`Router`].
///
/// Nests the device API under `/api` and caps request bodies at
/// `body_limit` bytes. There is no fallback: unknown routes get a 404.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn pairing<R>(state: PairingState<R>, body_limit: usize) -> Router
where
    R: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the test harness [`Router`].
///
/// `/health` is answered without being recorded; every other request goes
/// through the request log.
pub fn harness<S>(state: HarnessState<S>) -> Router
where
    S: RequestLogStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::harness::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
