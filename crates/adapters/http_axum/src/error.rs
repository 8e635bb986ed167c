//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use fieldlink_domain::error::{FieldlinkError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps failures to an HTTP response with the appropriate status code.
#[derive(Debug)]
pub enum ApiError {
    /// A use-case failed.
    Domain(FieldlinkError),
    /// The request body could not be read or decoded.
    Body { status: StatusCode, message: String },
}

impl ApiError {
    /// A body that could not be decoded; always `400 Bad Request`.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Body {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<FieldlinkError> for ApiError {
    fn from(err: FieldlinkError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<axum::extract::rejection::BytesRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::BytesRejection) -> Self {
        Self::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<axum::extract::rejection::FormRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::FormRejection) -> Self {
        Self::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(FieldlinkError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(FieldlinkError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(FieldlinkError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::Body { status, message } => {
                tracing::debug!(%status, %message, "rejected request body");
                (status, message)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlink_domain::error::NotFoundError;

    #[test]
    fn should_map_validation_to_bad_request() {
        let response = ApiError::from(ValidationError::MissingField("deviceId")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_not_found_to_404() {
        let err = FieldlinkError::from(NotFoundError {
            entity: "Device",
            id: "D1".to_string(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_hide_storage_errors_behind_500() {
        let err = FieldlinkError::Storage("disk on fire".into());
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_keep_status_of_body_errors() {
        let response = ApiError::malformed("bad json").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
