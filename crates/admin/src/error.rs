//! Unified error handling for the back office.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::platform::PlatformApiError;

/// Application-level error type for the back-office service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Platform backend call failed.
    #[error("Platform API error: {0}")]
    Platform(PlatformApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested action is not allowed in the order's current state.
    #[error("Action not allowed: {0}")]
    ActionNotAllowed(String),
}

impl From<PlatformApiError> for AppError {
    fn from(e: PlatformApiError) -> Self {
        // A backend 404 means the resource does not exist, not that the
        // backend is broken.
        match e {
            PlatformApiError::NotFound(path) => Self::NotFound(path),
            other => Self::Platform(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Platform(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Back-office request error"
            );
        }

        let status = match &self {
            Self::Platform(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ActionNotAllowed(_) => StatusCode::CONFLICT,
        };

        // Don't expose upstream error details to clients
        let message = match &self {
            Self::Platform(_) => "Upstream service error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order 123".to_string());
        assert_eq!(err.to_string(), "Not found: order 123");

        let err = AppError::ActionNotAllowed("order already shipped".to_string());
        assert_eq!(err.to_string(), "Action not allowed: order already shipped");
    }

    #[test]
    fn test_backend_not_found_maps_to_404() {
        let err = AppError::from(PlatformApiError::NotFound("/order/orders/9".to_string()));
        assert!(matches!(err, AppError::NotFound(_)));

        let err = AppError::from(PlatformApiError::Unauthorized);
        assert!(matches!(err, AppError::Platform(_)));
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::ActionNotAllowed("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::from(PlatformApiError::Unauthorized)),
            StatusCode::BAD_GATEWAY
        );
    }
}
