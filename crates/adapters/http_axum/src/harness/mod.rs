//! Connectivity test harness — every request is recorded and echoed.
//!
//! Unknown paths, and unexpected methods on known paths, land on a
//! catch-all that still records the request and answers `200`.

#[allow(clippy::missing_errors_doc)]
pub mod handlers;
#[allow(clippy::missing_errors_doc)]
pub mod requests;

use axum::Router;
use axum::routing::{any, get, post};

use fieldlink_app::ports::RequestLogStore;

use crate::dashboard;
use crate::state::HarnessState;

/// Build the harness router (without state or layers).
pub fn routes<S>() -> Router<HarnessState<S>>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(dashboard::recent::index::<S>).fallback(handlers::fallback::<S>),
        )
        .route(
            "/test",
            get(handlers::test::<S>).fallback(handlers::fallback::<S>),
        )
        .route(
            "/data",
            get(handlers::data_query::<S>)
                .post(handlers::data_body::<S>)
                .fallback(handlers::fallback::<S>),
        )
        .route("/ping", any(handlers::ping::<S>))
        .route(
            "/register",
            post(handlers::register::<S>).fallback(handlers::fallback::<S>),
        )
        .route(
            "/alert",
            post(handlers::alert::<S>).fallback(handlers::fallback::<S>),
        )
        .route(
            "/sensor",
            post(handlers::sensor::<S>).fallback(handlers::fallback::<S>),
        )
        .route(
            "/api/requests",
            get(requests::list::<S>)
                .delete(requests::clear::<S>)
                .fallback(handlers::fallback::<S>),
        )
        .fallback(handlers::fallback::<S>)
}
