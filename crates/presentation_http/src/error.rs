//! API error handling
//!
//! Every error response carries the same body shape: a timestamp, the
//! numeric status, a message and the request path that failed.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

/// API error type, carrying the request path for the response body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String, path: String },

    #[error("Not found: {message}")]
    NotFound { message: String, path: String },

    #[error("Rate limited")]
    RateLimited { path: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String, path: String },

    #[error("Internal error: {message}")]
    Internal { message: String, path: String },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// When the error occurred (RFC 3339)
    pub timestamp: String,
    /// HTTP status code
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Request path that produced the error
    pub path: String,
}

impl ApiError {
    /// Map an application error to the right status for the given path
    pub fn from_application(err: ApplicationError, path: impl Into<String>) -> Self {
        let path = path.into();
        match err {
            ApplicationError::Domain(e) => Self::BadRequest {
                message: e.to_string(),
                path,
            },
            ApplicationError::Storage(_)
            | ApplicationError::LanguageDetection(_)
            | ApplicationError::Synthesis(_)
            | ApplicationError::Transcription(_) => Self::ServiceUnavailable {
                message: err.to_string(),
                path,
            },
            ApplicationError::Configuration(_) | ApplicationError::Internal(_) => Self::Internal {
                message: err.to_string(),
                path,
            },
        }
    }

    const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, path) = match self {
            Self::BadRequest { message, path }
            | Self::NotFound { message, path }
            | Self::ServiceUnavailable { message, path }
            | Self::Internal { message, path } => (message, path),
            Self::RateLimited { path } => ("Too many requests".to_string(), path),
        };

        let body = ErrorResponse {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            message,
            path,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    #[test]
    fn domain_error_maps_to_bad_request() {
        let err = ApiError::from_application(DomainError::BlankText.into(), "/api/text-to-speech");
        assert!(matches!(err, ApiError::BadRequest { .. }));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_error_maps_to_service_unavailable() {
        let err = ApiError::from_application(
            ApplicationError::Synthesis("provider down".to_string()),
            "/api/text-to-speech",
        );
        assert!(matches!(err, ApiError::ServiceUnavailable { .. }));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let err = ApiError::from_application(
            ApplicationError::Internal("oops".to_string()),
            "/api/languages",
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_response_sets_status() {
        let err = ApiError::RateLimited {
            path: "/api/text-to-speech".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn error_body_carries_all_fields() {
        let body = ErrorResponse {
            timestamp: Utc::now().to_rfc3339(),
            status: 503,
            message: "Speech synthesis error: down".to_string(),
            path: "/api/text-to-speech".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 503);
        assert_eq!(json["path"], "/api/text-to-speech");
        assert!(json["timestamp"].as_str().is_some());
        assert!(json["message"].as_str().unwrap().contains("down"));
    }
}
