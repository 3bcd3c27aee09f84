//! Response types for the employment credit API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
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
        let message = error.to_string();
        let (status, code, details) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The server's policy configuration could not be read",
            ),
            EngineError::InvalidPolicy { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                "The server's policy configuration is invalid",
            ),
            EngineError::PolicyNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                "POLICY_NOT_FOUND",
                "No policy parameters are configured for the requested tax year",
            ),
            EngineError::RateNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                "RATE_NOT_FOUND",
                "The policy has no unit rate for the requested company size and region",
            ),
            EngineError::RetentionPeriodNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                "RETENTION_PERIOD_NOT_FOUND",
                "The policy has no retention period for the requested company size",
            ),
            EngineError::UnknownLabel { .. } => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_LABEL",
                "Company size or region label is not recognized",
            ),
            EngineError::UnknownClawbackMethod { .. } => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_CLAWBACK_METHOD",
                "Supported methods are proportional, all_or_nothing and tiered",
            ),
            EngineError::CalculationError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CALCULATION_ERROR",
                "The calculation could not be completed",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(code, message, details),
        }
    }
}
