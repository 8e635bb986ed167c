//! `POST /api/register` — device check-in.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fieldlink_app::ports::DeviceRepository;

use crate::body::{Payload, lenient_string};
use crate::error::ApiError;
use crate::state::PairingState;

/// Request body for a registration.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub device_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

/// Response body of a successful registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub message: &'static str,
    pub status: &'static str,
    pub shop_id: String,
}

/// Possible responses from the register endpoint.
pub enum RegisterResponse {
    /// First contact: the device was paired with a new shop.
    Created(Json<RegisterBody>),
    /// The device was already paired.
    Ok(Json<RegisterBody>),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/register`
pub async fn register<R>(
    State(state): State<PairingState<R>>,
    payload: Payload,
) -> Result<RegisterResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let req: RegisterRequest = serde_json::from_value(Value::Object(payload.into_object()))
        .map_err(|err| ApiError::malformed(err.to_string()))?;

    let registration = state
        .pairing_service
        .register(req.device_id, req.device_type, req.version)
        .await?;

    let shop_id = registration.shop_id.to_string();
    if registration.created {
        Ok(RegisterResponse::Created(Json(RegisterBody {
            message: "Registration successful. Device paired.",
            status: "paired",
            shop_id,
        })))
    } else {
        Ok(RegisterResponse::Ok(Json(RegisterBody {
            message: "Device already registered and paired.",
            status: "paired",
            shop_id,
        })))
    }
}
