//! Server-side rendered HTML dashboard (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod recent;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use fieldlink_domain::error::FieldlinkError;

/// Failure while building a dashboard page.
#[derive(Debug)]
pub enum DashboardError {
    /// A use-case failed.
    Domain(FieldlinkError),
    /// The template could not be rendered.
    Render(askama::Error),
}

impl From<FieldlinkError> for DashboardError {
    fn from(err: FieldlinkError) -> Self {
        Self::Domain(err)
    }
}

impl From<askama::Error> for DashboardError {
    fn from(err: askama::Error) -> Self {
        Self::Render(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        match &self {
            Self::Domain(err) => tracing::error!(error = %err, "dashboard query failed"),
            Self::Render(err) => tracing::error!(error = %err, "dashboard render failed"),
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500</h1><p>dashboard unavailable</p>"),
        )
            .into_response()
    }
}
