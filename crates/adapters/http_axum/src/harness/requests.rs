//! JSON access to the request log.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use fieldlink_app::ports::RequestLogStore;
use fieldlink_domain::request_log::LogEntry;

use crate::error::ApiError;
use crate::state::HarnessState;

/// `GET /api/requests` — recorded requests, newest first.
pub async fn list<S>(State(state): State<HarnessState<S>>) -> Result<Json<Vec<LogEntry>>, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    Ok(Json(state.request_log.recent().await?))
}

/// `DELETE /api/requests` — forget everything.
pub async fn clear<S>(State(state): State<HarnessState<S>>) -> Result<StatusCode, ApiError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    state.request_log.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
