// ABOUTME: Route handlers for the per-user shopping list REST API
// ABOUTME: Validates item payloads and supports bulk and recipe-derived inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Shopping list routes
//!
//! Payload validation happens here, not in the store: a valid item needs a
//! non-empty name, a positive amount, and a non-empty unit. Lists keep
//! insertion order, and the two clear variants either empty the list or
//! sweep only purchased items.

use super::user_id_from_headers;
use crate::errors::{AppError, ErrorCode};
use crate::models::{NewShoppingItem, ShoppingItemUpdate};
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Raw add-item payload; optional fields so missing ones yield 400, not 422
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest {
    name: Option<String>,
    amount: Option<f64>,
    unit: Option<String>,
    #[serde(default)]
    purchased: bool,
    recipe_id: Option<u64>,
    recipe_name: Option<String>,
}

impl AddItemRequest {
    /// Validate the payload into a store-ready item
    fn validate(self) -> Result<NewShoppingItem, AppError> {
        let name = self.name.unwrap_or_default();
        let unit = self.unit.unwrap_or_default();
        let amount = self.amount.unwrap_or_default();

        if name.trim().is_empty() || unit.trim().is_empty() || amount <= 0.0 {
            return Err(AppError::invalid_request(
                "Name, amount, and unit are required",
            ));
        }

        Ok(NewShoppingItem {
            name,
            amount,
            unit,
            purchased: self.purchased,
            recipe_id: self.recipe_id,
            recipe_name: self.recipe_name,
        })
    }
}

/// Request body for bulk insertion
#[derive(Debug, Deserialize)]
struct BulkAddRequest {
    items: Option<serde_json::Value>,
}

/// Shopping list route handlers
pub struct ShoppingListRoutes;

impl ShoppingListRoutes {
    /// Create shopping list routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/shopping-list", get(Self::handle_list))
            .route("/api/shopping-list", post(Self::handle_add))
            .route("/api/shopping-list/bulk", post(Self::handle_add_bulk))
            .route(
                "/api/shopping-list/from-recipe/:id",
                post(Self::handle_add_from_recipe),
            )
            .route("/api/shopping-list/clear/all", delete(Self::handle_clear))
            .route(
                "/api/shopping-list/clear/purchased",
                delete(Self::handle_clear_purchased),
            )
            .route("/api/shopping-list/:id", put(Self::handle_update))
            .route("/api/shopping-list/:id", delete(Self::handle_remove))
            .with_state(resources)
    }

    /// Handle GET /api/shopping-list
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        let items = resources.shopping_list.list(&user_id);
        Ok((StatusCode::OK, Json(items)).into_response())
    }

    /// Handle POST /api/shopping-list
    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AddItemRequest>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        let item = resources.shopping_list.add(&user_id, request.validate()?);
        Ok((StatusCode::CREATED, Json(item)).into_response())
    }

    /// Handle POST /api/shopping-list/bulk
    async fn handle_add_bulk(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<BulkAddRequest>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let raw_items = match request.items {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(AppError::invalid_request("Items must be an array")),
        };

        let mut validated = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            let request: AddItemRequest = serde_json::from_value(raw)
                .map_err(|_| AppError::invalid_request("Name, amount, and unit are required"))?;
            validated.push(request.validate()?);
        }

        let items = resources.shopping_list.add_many(&user_id, validated);
        Ok((StatusCode::CREATED, Json(items)).into_response())
    }

    /// Handle POST /api/shopping-list/from-recipe/:id
    ///
    /// Fetches the recipe through the cached lookup service and inserts one
    /// item per extended ingredient, tagged with the originating recipe.
    async fn handle_add_from_recipe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(recipe_id): Path<u64>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        let recipe = resources.recipe_service.get_recipe(recipe_id).await?;
        let ingredients = recipe.extended_ingredients.unwrap_or_default();

        if ingredients.is_empty() {
            return Err(AppError::invalid_request(
                "Recipe has no ingredient information",
            ));
        }

        let new_items: Vec<NewShoppingItem> = ingredients
            .into_iter()
            .map(|ingredient| NewShoppingItem {
                name: ingredient.name,
                amount: ingredient.amount,
                unit: ingredient.unit,
                purchased: false,
                recipe_id: Some(recipe_id),
                recipe_name: Some(recipe.title.clone()),
            })
            .collect();

        let items = resources.shopping_list.add_many(&user_id, new_items);
        Ok((StatusCode::CREATED, Json(items)).into_response())
    }

    /// Handle PUT /api/shopping-list/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(item_id): Path<String>,
        Json(update): Json<ShoppingItemUpdate>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        if let Some(amount) = update.amount {
            if amount <= 0.0 {
                return Err(AppError::invalid_request("Amount must be positive"));
            }
        }
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::invalid_request("Name must not be empty"));
            }
        }

        resources
            .shopping_list
            .update(&user_id, &item_id, update)
            .map_or_else(
                || Err(AppError::new(ErrorCode::NotFound, "Item not found")),
                |item| Ok((StatusCode::OK, Json(item)).into_response()),
            )
    }

    /// Handle DELETE /api/shopping-list/:id
    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(item_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);

        if !resources.shopping_list.remove(&user_id, &item_id) {
            return Err(AppError::new(ErrorCode::NotFound, "Item not found"));
        }

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Item removed",
                "itemId": item_id
            })),
        )
            .into_response())
    }

    /// Handle DELETE /api/shopping-list/clear/all
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        resources.shopping_list.clear(&user_id);

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Shopping list cleared" })),
        )
            .into_response())
    }

    /// Handle DELETE /api/shopping-list/clear/purchased
    async fn handle_clear_purchased(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = user_id_from_headers(&headers);
        resources.shopping_list.clear_purchased(&user_id);

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Purchased items cleared" })),
        )
            .into_response())
    }
}
