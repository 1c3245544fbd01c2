// ABOUTME: Route handlers for recipe search and lookup endpoints
// ABOUTME: Proxies the cached lookup service and attaches per-user favorite flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Recipe routes
//!
//! Read-only proxy over the upstream recipe API. Responses pass through the
//! cache layer (except `/random`) and every recipe payload leaves with the
//! caller's `isFavorite` flag attached.

use super::user_id_from_headers;
use crate::errors::AppError;
use crate::models::SearchParams;
use crate::server::ServerResources;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for `/api/recipes/random`
#[derive(Debug, Deserialize)]
struct RandomQuery {
    number: Option<u32>,
    tags: Option<String>,
}

/// Query parameters for `/api/recipes/by-ingredients`
#[derive(Debug, Deserialize)]
struct ByIngredientsQuery {
    ingredients: Option<String>,
    number: Option<u32>,
}

/// Query parameters for `/api/recipes/:id/similar`
#[derive(Debug, Deserialize)]
struct SimilarQuery {
    limit: Option<u32>,
}

/// Recipe lookup route handlers
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/search", get(Self::handle_search))
            .route("/api/recipes/random", get(Self::handle_random))
            .route(
                "/api/recipes/by-ingredients",
                get(Self::handle_by_ingredients),
            )
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id/similar", get(Self::handle_similar))
            .with_state(resources)
    }

    /// Handle GET /api/recipes/search
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<SearchParams>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let mut results = resources.recipe_service.search(params).await?;
        results.results = resources.favorites.annotate_all(&user_id, results.results);

        Ok((StatusCode::OK, Json(results)).into_response())
    }

    /// Handle GET /api/recipes/random
    async fn handle_random(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RandomQuery>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let recipes = resources
            .recipe_service
            .get_random(query.number, query.tags.as_deref())
            .await?;
        let recipes = resources.favorites.annotate_all(&user_id, recipes);

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /api/recipes/by-ingredients
    async fn handle_by_ingredients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ByIngredientsQuery>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let ingredients: Vec<String> = query
            .ingredients
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        if ingredients.is_empty() {
            return Err(AppError::invalid_request("Ingredients are required"));
        }

        let recipes = resources
            .recipe_service
            .get_by_ingredients(ingredients, query.number)
            .await?;
        let recipes = resources.favorites.annotate_all(&user_id, recipes);

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /api/recipes/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<u64>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let recipe = resources.recipe_service.get_recipe(recipe_id).await?;
        let recipe = resources.favorites.annotate(&user_id, recipe);

        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle GET /api/recipes/:id/similar
    async fn handle_similar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<u64>,
        Query(query): Query<SimilarQuery>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let recipes = resources
            .recipe_service
            .get_similar(recipe_id, query.limit)
            .await?;
        let recipes = resources.favorites.annotate_all(&user_id, recipes);

        Ok((StatusCode::OK, Json(recipes)).into_response())
    }
}
