//! `POST /api/data` — sensor readings and alerts from paired devices.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fieldlink_app::ports::DeviceRepository;
use fieldlink_domain::submission::{Submission, SubmissionKind};

use crate::body::{Payload, lenient_string};
use crate::error::ApiError;
use crate::state::PairingState;

/// Request body of a data or alert submission.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub device_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shop_id: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub alert_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

impl DataRequest {
    fn into_submission(self) -> Result<Submission, ApiError> {
        let kind = SubmissionKind::classify(
            self.kind.as_deref(),
            self.data,
            self.alert_type,
            self.message,
        );
        Ok(Submission::new(self.device_id, self.shop_id, kind)?)
    }
}

/// Acknowledgement body.
#[derive(Debug, Serialize)]
pub struct AckBody {
    pub status: &'static str,
}

/// Possible responses from the data endpoint.
pub enum DataResponse {
    Ok(Json<AckBody>),
}

impl IntoResponse for DataResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/data`
pub async fn submit<R>(
    State(state): State<PairingState<R>>,
    payload: Payload,
) -> Result<DataResponse, ApiError>
where
    R: DeviceRepository + Send + Sync + 'static,
{
    let req: DataRequest = serde_json::from_value(Value::Object(payload.into_object()))
        .map_err(|err| ApiError::malformed(err.to_string()))?;

    state
        .pairing_service
        .submit(req.into_submission()?)
        .await?;

    Ok(DataResponse::Ok(Json(AckBody {
        status: "Data received",
    })))
}
