// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Unified Error Handling System
//!
//! This module provides a centralized error handling system for the Remy
//! recipe server. It defines standard error types, error codes, and HTTP
//! response formatting to ensure consistent error handling across all
//! modules and APIs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized = 1000,
    #[serde(rename = "INVALID_CREDENTIALS")]
    InvalidCredentials = 1001,
    #[serde(rename = "TOKEN_EXPIRED")]
    TokenExpired = 1002,
    #[serde(rename = "USER_EXISTS")]
    UserExists = 1003,

    // Validation (3000-3999)
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest = 3000,

    // Resource Management (4000-4999)
    #[serde(rename = "NOT_FOUND")]
    NotFound = 4000,

    // Upstream Recipe API (5000-5999)
    #[serde(rename = "UPSTREAM_ERROR")]
    UpstreamError = 5000,
    #[serde(rename = "UPSTREAM_UNAVAILABLE")]
    UpstreamUnavailable = 5001,
    #[serde(rename = "UPSTREAM_AUTH_FAILED")]
    UpstreamAuthFailed = 5002,
    #[serde(rename = "UPSTREAM_QUOTA_EXCEEDED")]
    UpstreamQuotaExceeded = 5003,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
    #[serde(rename = "CACHE_ERROR")]
    CacheError = 9002,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            ErrorCode::InvalidRequest => 400,

            // 401 Unauthorized (upstream auth failures surface the upstream 401)
            ErrorCode::Unauthorized
            | ErrorCode::InvalidCredentials
            | ErrorCode::TokenExpired
            | ErrorCode::UpstreamAuthFailed => 401,

            // 402 Payment Required (upstream plan quota exhausted)
            ErrorCode::UpstreamQuotaExceeded => 402,

            // 404 Not Found
            ErrorCode::NotFound => 404,

            // 409 Conflict
            ErrorCode::UserExists => 409,

            // 502 Bad Gateway
            ErrorCode::UpstreamError => 502,

            // 503 Service Unavailable
            ErrorCode::UpstreamUnavailable => 503,

            // 500 Internal Server Error
            ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::CacheError
            | ErrorCode::SerializationError
            | ErrorCode::ConfigError => 500,
        }
    }

    /// Get a user-friendly description of this error
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "Authentication is required to access this resource",
            ErrorCode::InvalidCredentials => "The provided credentials are invalid",
            ErrorCode::TokenExpired => "The authentication token has expired",
            ErrorCode::UserExists => "A user with this email already exists",
            ErrorCode::InvalidRequest => "The provided input is invalid",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::UpstreamError => "The recipe provider reported an error",
            ErrorCode::UpstreamUnavailable => "The recipe provider is currently unavailable",
            ErrorCode::UpstreamAuthFailed => "Authentication with the recipe provider failed",
            ErrorCode::UpstreamQuotaExceeded => "Recipe provider usage quota exceeded",
            ErrorCode::ConfigError => "Configuration error encountered",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::CacheError => "Cache operation failed",
            ErrorCode::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// User identifier if available
    pub user_id: Option<String>,
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            user_id: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add a user identifier to the error context
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.context.user_id = Some(user_id.into());
        self
    }

    /// Add a resource ID to the error context
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Axum response integration: every handler error renders the standard body
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = ?self.code, "request failed: {}", self.message);
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required or bearer token rejected
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Login rejected
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid email or password")
    }

    /// Bearer token past its expiry
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired, "Authentication token has expired")
    }

    /// Registration conflict
    pub fn user_exists(email: impl Into<String>) -> Self {
        Self::new(ErrorCode::UserExists, "User already exists").with_resource_id(email)
    }

    /// Invalid input
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Cache backend error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CacheError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Upstream rejected our API key
    pub fn upstream_auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamAuthFailed, message)
    }

    /// Upstream plan quota exhausted
    pub fn upstream_quota() -> Self {
        Self::new(
            ErrorCode::UpstreamQuotaExceeded,
            "API quota exceeded. Please try again later",
        )
    }

    /// Upstream unreachable at the network level
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Any other upstream-reported failure, carrying the upstream status code
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message).with_details(serde_json::json!({
            "upstream_status": status
        }))
    }
}

/// Conversion from anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Extract the root cause if available for better error chaining
        match error.source() {
            Some(source) => AppError::new(ErrorCode::InternalError, error.to_string())
                .with_details(serde_json::json!({
                    "source": source.to_string()
                })),
            None => AppError::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::new(ErrorCode::SerializationError, error.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError::new(ErrorCode::DatabaseError, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidRequest.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::UpstreamQuotaExceeded.http_status(), 402);
        assert_eq!(ErrorCode::UpstreamUnavailable.http_status(), 503);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_app_error_creation() {
        let error = AppError::unauthorized("missing bearer token")
            .with_request_id("req-123")
            .with_user_id("anonymous");

        assert_eq!(error.code, ErrorCode::Unauthorized);
        assert!(error.context.request_id.is_some());
        assert!(error.context.user_id.is_some());
    }

    #[test]
    fn test_upstream_error_carries_status() {
        let error = AppError::upstream(500, "upstream exploded");
        assert_eq!(error.http_status(), 502);
        assert_eq!(error.context.details["upstream_status"], 500);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::upstream_quota();
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("UPSTREAM_QUOTA_EXCEEDED"));
    }
}
