// ABOUTME: Route handlers for the per-user favorites REST API
// ABOUTME: Stores recipe IDs per user and hydrates full payloads on listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Favorites routes
//!
//! The store holds recipe IDs only; listing hydrates each ID through the
//! cached lookup service. A favorite whose upstream recipe has vanished is
//! silently skipped rather than failing the whole listing.

use super::user_id_from_headers;
use crate::errors::{AppError, ErrorCode};
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use futures_util::future::join_all;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for adding a favorite
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteRequest {
    recipe_id: Option<u64>,
}

/// Favorites route handlers
pub struct FavoritesRoutes;

impl FavoritesRoutes {
    /// Create favorites routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/favorites", get(Self::handle_list))
            .route("/api/favorites", post(Self::handle_add))
            .route("/api/favorites/clear/all", delete(Self::handle_clear))
            .route("/api/favorites/:id", delete(Self::handle_remove))
            .with_state(resources)
    }

    /// Handle GET /api/favorites - hydrate the user's favorite recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        let ids = resources.favorites.list(&user_id);

        // Vanished upstream recipes are dropped, not surfaced as errors
        let lookups = ids
            .iter()
            .map(|&id| resources.recipe_service.get_recipe(id));
        let recipes: Vec<_> = join_all(lookups)
            .await
            .into_iter()
            .filter_map(Result::ok)
            .collect();

        let recipes = resources.favorites.annotate_all(&user_id, recipes);
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle POST /api/favorites
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AddFavoriteRequest>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let recipe_id = request
            .recipe_id
            .ok_or_else(|| AppError::invalid_request("Recipe ID is required"))?;

        let added = resources.favorites.add(&user_id, recipe_id);
        let (status, message) = if added {
            (StatusCode::CREATED, "Recipe added to favorites")
        } else {
            (StatusCode::OK, "Recipe already in favorites")
        };

        Ok((
            status,
            Json(serde_json::json!({
                "message": message,
                "recipeId": recipe_id
            })),
        )
            .into_response())
    }

    /// Handle DELETE /api/favorites/:id
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<u64>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        if !resources.favorites.remove(&user_id, recipe_id) {
            return Err(AppError::new(
                ErrorCode::NotFound,
                "Recipe not found in favorites",
            ));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Recipe removed from favorites",
                "recipeId": recipe_id
            })),
        )
            .into_response())
    }

    /// Handle DELETE /api/favorites/clear/all
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        resources.favorites.clear(&user_id);

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "All favorites cleared" })),
        )
            .into_response())
    }
}
