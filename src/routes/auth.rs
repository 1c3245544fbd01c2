// ABOUTME: Route handlers for account registration, login, refresh, and profile
// ABOUTME: The only routes that use bearer tokens instead of the x-user-id header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Authentication routes
//!
//! Registration and login return a token pair alongside the public view of
//! the account. The profile endpoint is the sole bearer-protected route.

use crate::auth::TokenPair;
use crate::errors::AppError;
use crate::models::User;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    display_name: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Refresh request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    refresh_token: Option<String>,
}

/// Public view of a user account
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserResponse {
    id: String,
    email: String,
    display_name: Option<String>,
    created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response carrying the account and its token pair
#[derive(Debug, Serialize)]
struct AuthResponse {
    message: &'static str,
    user: UserResponse,
    tokens: TokenPair,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/refresh", post(Self::handle_refresh))
            .route("/api/auth/profile", get(Self::handle_profile))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let (email, password) = required_credentials(request.email, request.password)?;

        if !email.contains('@') {
            return Err(AppError::invalid_request("Invalid email format"));
        }

        let (user, tokens) = resources
            .auth_manager
            .register(&email, &password, request.display_name)
            .await?;

        Ok((
            StatusCode::CREATED,
            Json(AuthResponse {
                message: "User registered successfully",
                user: user.into(),
                tokens,
            }),
        )
            .into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let (email, password) = required_credentials(request.email, request.password)?;

        let (user, tokens) = resources.auth_manager.login(&email, &password).await?;

        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                message: "Login successful",
                user: user.into(),
                tokens,
            }),
        )
            .into_response())
    }

    /// Handle POST /api/auth/refresh
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RefreshRequest>,
    ) -> Result<Response, AppError> {
        let refresh_token = request
            .refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::invalid_request("Refresh token is required"))?;

        let (user, tokens) = resources.auth_manager.refresh(&refresh_token).await?;

        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                message: "Token refreshed",
                user: user.into(),
                tokens,
            }),
        )
            .into_response())
    }

    /// Handle GET /api/auth/profile
    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let token = bearer_token(&headers)?;
        let claims = resources.auth_manager.validate_access_token(token)?;
        let user = resources.auth_manager.user_from_claims(&claims).await?;

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "user": UserResponse::from(user) })),
        )
            .into_response())
    }
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing or malformed Authorization header"))
}

/// Both email and password must be present and non-empty
fn required_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), AppError> {
    match (email, password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(AppError::invalid_request("Email and password are required")),
    }
}
