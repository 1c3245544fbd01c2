// ABOUTME: HTTP route registration and router assembly for the recipe API
// ABOUTME: Wires route modules, CORS, tracing, timeouts, and the JSON 404 fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # HTTP Routes
//!
//! Each route module exposes a `routes(resources)` constructor returning a
//! self-contained [`Router`]; this module merges them and applies the shared
//! middleware stack. Recipe, favorites, and shopping-list routes identify the
//! caller through the `x-user-id` header (falling back to `anonymous`);
//! only the auth profile endpoint requires a bearer token.

pub mod auth;
pub mod favorites;
pub mod health;
pub mod recipes;
pub mod shopping_list;

use crate::constants::{identity, timeouts};
use crate::server::ServerResources;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Assemble the full application router with middleware
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = cors_layer(&resources.config.security.cors_origin);

    Router::new()
        .merge(health::HealthRoutes::routes(resources.clone()))
        .merge(recipes::RecipeRoutes::routes(resources.clone()))
        .merge(favorites::FavoritesRoutes::routes(resources.clone()))
        .merge(shopping_list::ShoppingListRoutes::routes(resources.clone()))
        .merge(auth::AuthRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            timeouts::REQUEST_TIMEOUT_SECS,
        )))
}

/// CORS policy for the configured frontend origin
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = origin.parse::<HeaderValue>().map_or_else(
        |_| {
            tracing::warn!("Invalid CORS_ORIGIN '{origin}', allowing any origin");
            AllowOrigin::any()
        },
        AllowOrigin::exact,
    );

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::HeaderName::from_static(identity::USER_ID_HEADER),
        ])
}

/// Resolve the caller identity from the `x-user-id` header
///
/// Absent or unreadable headers fall back to the shared anonymous identity.
pub(crate) fn user_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(identity::USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(identity::ANONYMOUS_USER)
        .to_owned()
}

/// JSON 404 body for unmatched routes
async fn handle_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": "Route not found",
            "status": 404
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_falls_back_to_anonymous() {
        let headers = HeaderMap::new();
        assert_eq!(user_id_from_headers(&headers), "anonymous");
    }

    #[test]
    fn test_user_id_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("alice"));
        assert_eq!(user_id_from_headers(&headers), "alice");
    }

    #[test]
    fn test_empty_user_id_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static(""));
        assert_eq!(user_id_from_headers(&headers), "anonymous");
    }
}
