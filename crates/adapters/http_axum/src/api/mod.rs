//! Device pairing API — JSON handlers used by field devices.

#[allow(clippy::missing_errors_doc)]
pub mod data;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod register;

use axum::Router;
use axum::routing::{get, post};

use fieldlink_app::ports::DeviceRepository;

use crate::state::PairingState;

/// Build the `/api` sub-router.
pub fn routes<R>() -> Router<PairingState<R>>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(register::register::<R>))
        .route("/data", post(data::submit::<R>))
        .route("/devices", get(devices::list::<R>))
        .route("/devices/{id}", get(devices::get::<R>))
}
