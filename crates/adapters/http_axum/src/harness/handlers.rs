//! Echo handlers for the test harness.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use serde_json::{Map, Value};

use fieldlink_app::ports::RequestLogStore;
use fieldlink_domain::request_log::LogEntry;
use fieldlink_domain::time::Timestamp;

use crate::body::{Payload, RequestInfo, truthy_text};
use crate::error::ApiError;
use crate::state::HarnessState;

async fn record<S>(
    state: &HarnessState<S>,
    info: RequestInfo,
    payload: Payload,
) -> Result<LogEntry, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    Ok(state
        .request_log
        .record(info.into_metadata(payload.0))
        .await?)
}

/// Read a string-ish field from an object body.
fn text_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(truthy_text)
}

/// `GET /test`
pub async fn test<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<&'static str, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    record(&state, info, payload).await?;
    Ok("OK - GET received from SIM900")
}

/// Echo of a query string.
#[derive(Debug, Serialize)]
pub struct QueryEcho {
    pub success: bool,
    pub method: String,
    pub query: Map<String, Value>,
    pub timestamp: Timestamp,
}

/// `GET /data` — echoes the query parameters.
pub async fn data_query<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<QueryEcho>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let query = info.query_object();
    let entry = record(&state, info, payload).await?;
    Ok(Json(QueryEcho {
        success: true,
        method: entry.method,
        query,
        timestamp: entry.timestamp,
    }))
}

/// Echo of a request body.
#[derive(Debug, Serialize)]
pub struct BodyEcho {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub received: Value,
    pub timestamp: Timestamp,
}

/// `POST /data` — echoes the decoded body.
pub async fn data_body<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<BodyEcho>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entry = record(&state, info, payload).await?;
    Ok(Json(BodyEcho {
        success: true,
        message: None,
        received: entry.body,
        timestamp: entry.timestamp,
    }))
}

/// `POST /sensor`
pub async fn sensor<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<BodyEcho>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entry = record(&state, info, payload).await?;
    Ok(Json(BodyEcho {
        success: true,
        message: Some("Sensor data received"),
        received: entry.body,
        timestamp: entry.timestamp,
    }))
}

/// `ANY /ping`
pub async fn ping<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<&'static str, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    record(&state, info, payload).await?;
    Ok("PONG")
}

/// Acknowledgement of a harness registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAck {
    pub success: bool,
    pub device_id: String,
    pub message: &'static str,
    pub timestamp: Timestamp,
}

/// `POST /register` — echoes `deviceId`, or derives one from the entry id.
pub async fn register<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<RegisterAck>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entry = record(&state, info, payload).await?;
    let device_id =
        text_field(&entry.body, "deviceId").unwrap_or_else(|| format!("DEV-{}", entry.id));
    Ok(Json(RegisterAck {
        success: true,
        device_id,
        message: "Device registered",
        timestamp: entry.timestamp,
    }))
}

/// Acknowledgement of a harness alert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertAck {
    pub success: bool,
    pub alert_type: String,
    pub message: &'static str,
    pub timestamp: Timestamp,
}

/// `POST /alert` — echoes `alertType`.
pub async fn alert<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<AlertAck>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entry = record(&state, info, payload).await?;
    let alert_type = text_field(&entry.body, "alertType").unwrap_or_else(|| "unknown".to_string());
    tracing::warn!(
        alert_type = %alert_type,
        origin = entry.origin.as_deref().unwrap_or("unknown"),
        message = text_field(&entry.body, "message").unwrap_or_default(),
        "alert received"
    );
    Ok(Json(AlertAck {
        success: true,
        alert_type,
        message: "Alert received",
        timestamp: entry.timestamp,
    }))
}

/// Generic acknowledgement for anything the harness has no route for.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: &'static str,
    pub method: String,
    pub path: String,
    pub timestamp: Timestamp,
}

/// Catch-all: record and acknowledge.
pub async fn fallback<S>(
    State(state): State<HarnessState<S>>,
    info: RequestInfo,
    payload: Payload,
) -> Result<Json<Ack>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entry = record(&state, info, payload).await?;
    Ok(Json(Ack {
        success: true,
        message: "Request received",
        method: entry.method,
        path: entry.path,
        timestamp: entry.timestamp,
    }))
}
