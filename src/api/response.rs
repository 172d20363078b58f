//! Response types for the VR benefit engine API.
//!
//! This module defines the error body and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::PipelineResult;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Successful `/calculate` response.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse {
    /// Whether the published table was replaced.
    pub published: bool,
    /// The pipeline result.
    #[serde(flatten)]
    pub result: PipelineResult,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = if error.is_caller_error() {
            StatusCode::BAD_REQUEST
        } else if error.is_source_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let (code, hint) = match &error {
            EngineError::InvalidCompetency { .. } => (
                "INVALID_COMPETENCY",
                "Month must be between 1 and 12 and year must be positive",
            ),
            EngineError::SourceNotFound { .. } => (
                "SOURCE_NOT_FOUND",
                "An expected source extract is missing from the source directory",
            ),
            EngineError::SourceParseError { .. } => (
                "SOURCE_UNREADABLE",
                "A source extract could not be read as CSV",
            ),
            EngineError::MissingColumn { .. } => (
                "MISSING_COLUMN",
                "A source extract lacks a required column",
            ),
            EngineError::InvalidField { .. } => (
                "INVALID_FIELD",
                "A source cell holds a value of the wrong type",
            ),
            EngineError::DuplicateWorkerId { .. } | EngineError::DuplicateKey { .. } => (
                "DUPLICATE_KEY",
                "A source extract repeats a key that must be unique",
            ),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                "CONFIG_ERROR",
                "The engine configuration is invalid",
            ),
            EngineError::PublishError { .. } => (
                "PUBLISH_ERROR",
                "The published table was left unchanged",
            ),
        };
        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, error.to_string(), hint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_competency_is_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidCompetency {
            month: 13,
            year: 2025,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_COMPETENCY");
        assert!(api_error.error.message.contains("13/2025"));
    }

    #[test]
    fn test_source_errors_are_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::MissingColumn {
            source_name: "active_workers".to_string(),
            column: "MATRICULA".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.code, "MISSING_COLUMN");

        let api_error: ApiErrorResponse = EngineError::DuplicateWorkerId {
            source_name: "terminations".to_string(),
            worker_id: 7,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_publish_error_is_server_error() {
        let api_error: ApiErrorResponse = EngineError::PublishError {
            table: "tabela_compra_vr".to_string(),
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "PUBLISH_ERROR");
    }
}
