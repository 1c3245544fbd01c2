// ABOUTME: Health check endpoint reporting database and cache status
// ABOUTME: Database failures degrade the service; cache failures are informational
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Health routes
//!
//! A failing database makes the service degraded (503) because auth stops
//! working. A failing cache does not: lookups degrade to pass-through, so
//! the probe only reports it.

use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Health check route handlers
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create health routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    /// Handle GET /health
    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let database_ok = resources.database.health_check().await.is_ok();
        let cache_ok = resources.cache.health_check().await.is_ok();

        let (status_code, status) = if database_ok {
            (StatusCode::OK, "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };

        let body = serde_json::json!({
            "status": status,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "uptime": resources.started_at.elapsed().as_secs(),
            "environment": resources.config.environment.to_string(),
            "database": if database_ok { "connected" } else { "error" },
            "cache": {
                "backend": resources.cache.backend_name(),
                "status": if cache_ok { "connected" } else { "degraded" },
            },
        });

        (status_code, Json(body)).into_response()
    }
}
