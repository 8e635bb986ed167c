//! Dashboard page listing the most recent requests.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use chrono::SecondsFormat;

use fieldlink_app::ports::RequestLogStore;
use fieldlink_domain::request_log::LogEntry;

use super::DashboardError;
use crate::state::HarnessState;

/// One request, pre-formatted for display.
pub struct EntryView {
    id: String,
    time: String,
    method: String,
    path: String,
    origin: String,
    query: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl From<LogEntry> for EntryView {
    fn from(entry: LogEntry) -> Self {
        let body = entry.body_text();
        let query = entry
            .query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        Self {
            id: entry.id.to_string(),
            time: entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            method: entry.method,
            path: entry.path,
            origin: entry.origin.unwrap_or_else(|| "unknown".to_string()),
            query,
            headers: entry.headers.into_iter().collect(),
            body,
        }
    }
}

/// Recent requests page template.
#[derive(Template)]
#[template(path = "recent_requests.html")]
pub struct RecentRequestsTemplate {
    refresh_seconds: u32,
    entries: Vec<EntryView>,
}

/// `GET /` — recent requests, newest first.
pub async fn index<S>(State(state): State<HarnessState<S>>) -> Result<Html<String>, DashboardError>
where
    S: RequestLogStore + Send + Sync + 'static,
{
    let entries = state
        .request_log
        .recent()
        .await?
        .into_iter()
        .map(EntryView::from)
        .collect();

    let page = RecentRequestsTemplate {
        refresh_seconds: state.refresh_seconds,
        entries,
    };
    Ok(Html(page.render()?))
}
