//! Read-only device listing, for debugging pairings.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use fieldlink_app::ports::DeviceRepository;
use fieldlink_domain::device::Device;
use fieldlink_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::PairingState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<R>(State(state): State<PairingState<R>>) -> Result<ListResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let devices = state.pairing_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/:id`
pub async fn get<R>(
    State(state): State<PairingState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let device_id = DeviceId::new(id)?;
    let device = state.pairing_service.get_device(&device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}
