// ABOUTME: End-to-end HTTP tests driving the assembled router with oneshot requests
// ABOUTME: Covers recipes, favorites, shopping list, auth flow, health, and the 404 fallback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use remy::auth::AuthManager;
use remy::cache::{factory::Cache, CacheConfig};
use remy::config::environment::{
    AuthConfig, CacheSettings, DatabaseConfig, DatabaseUrl, Environment, LogLevel,
    RedisConnectionConfig, SecurityConfig, ServerConfig, SpoonacularConfig,
};
use remy::database::Database;
use remy::errors::AppResult;
use remy::models::{Ingredient, Recipe, SearchParams, SearchResults};
use remy::providers::RecipeProvider;
use remy::routes;
use remy::server::ServerResources;
use remy::services::RecipeService;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Stub provider returning canned recipes without network access
struct StubProvider;

fn stub_recipe(id: u64) -> Recipe {
    Recipe {
        id,
        title: format!("Recipe {id}"),
        image: String::new(),
        image_type: None,
        ready_in_minutes: Some(30),
        servings: Some(2),
        source_url: None,
        summary: None,
        cuisines: None,
        dish_types: None,
        diets: None,
        occasions: None,
        instructions: None,
        analyzed_instructions: None,
        extended_ingredients: Some(vec![Ingredient {
            id: 1,
            name: "flour".to_string(),
            original: "2 cups flour".to_string(),
            amount: 2.0,
            unit: "cups".to_string(),
            image: None,
            meta: None,
        }]),
        nutrition: None,
        is_favorite: None,
    }
}

#[async_trait::async_trait]
impl RecipeProvider for StubProvider {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    async fn search_recipes(&self, _params: &SearchParams) -> AppResult<SearchResults> {
        Ok(SearchResults {
            results: vec![stub_recipe(1), stub_recipe(2)],
            total_results: 2,
        })
    }

    async fn get_recipe_by_id(&self, recipe_id: u64) -> AppResult<Recipe> {
        Ok(stub_recipe(recipe_id))
    }

    async fn get_similar_recipes(&self, _recipe_id: u64, limit: u32) -> AppResult<Vec<Recipe>> {
        Ok((10..10 + u64::from(limit)).map(stub_recipe).collect())
    }

    async fn get_recipes_by_ingredients(
        &self,
        _ingredients: &[String],
        _number: u32,
    ) -> AppResult<Vec<Recipe>> {
        Ok(vec![stub_recipe(3)])
    }

    async fn get_random_recipes(&self, _number: u32, _tags: Option<&str>) -> AppResult<Vec<Recipe>> {
        Ok(vec![stub_recipe(4)])
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        log_level: LogLevel::Info,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            auto_migrate: true,
        },
        auth: AuthConfig {
            jwt_secret: "e2e-test-secret".to_string(),
            jwt_expiry_hours: 1,
            jwt_refresh_secret: "e2e-test-refresh-secret".to_string(),
            jwt_refresh_expiry_hours: 24,
        },
        spoonacular: SpoonacularConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost".to_string(),
            cache_ttl_secs: 3600,
        },
        cache: CacheSettings {
            redis_url: None,
            max_entries: 100,
            cleanup_interval_secs: 300,
        },
        security: SecurityConfig {
            cors_origin: "http://localhost:3000".to_string(),
        },
    }
}

/// Build an app instance with stubbed upstream and in-memory storage
async fn test_app() -> Result<Router> {
    let config = Arc::new(test_config());

    let database = Database::new("sqlite::memory:").await?;
    database.migrate().await?;

    let cache = Cache::new(CacheConfig {
        max_entries: 100,
        redis_url: None,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false,
        redis_connection: RedisConnectionConfig::default(),
    })
    .await?;

    let recipe_service = Arc::new(RecipeService::new(
        Arc::new(StubProvider),
        cache.clone(),
        Duration::from_secs(3600),
    ));

    let auth_manager = AuthManager::new(database.clone(), config.auth.clone());

    let resources = Arc::new(ServerResources::new(
        config,
        database,
        auth_manager,
        recipe_service,
        cache,
    ));

    Ok(routes::router(resources))
}

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn get(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", user)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: &str, uri: &str, user: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn test_health_reports_ok() -> Result<()> {
    let app = test_app().await?;

    let response = app.oneshot(get("/health", "anonymous")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["cache"]["backend"], "memory");
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() -> Result<()> {
    let app = test_app().await?;

    let response = app.oneshot(get("/api/nope", "anonymous")).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await?;
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["status"], 404);
    Ok(())
}

#[tokio::test]
async fn test_search_attaches_favorite_flags() -> Result<()> {
    let app = test_app().await?;

    // Favorite recipe 1 as alice
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            "alice",
            serde_json::json!({"recipeId": 1}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get("/api/recipes/search?query=pasta", "alice"))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["totalResults"], 2);
    assert_eq!(body["results"][0]["isFavorite"], true);
    assert_eq!(body["results"][1]["isFavorite"], false);
    Ok(())
}

#[tokio::test]
async fn test_by_ingredients_requires_ingredients() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(get("/api/recipes/by-ingredients", "anonymous"))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    Ok(())
}

#[tokio::test]
async fn test_favorite_add_is_idempotent() -> Result<()> {
    let app = test_app().await?;

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            "alice",
            serde_json::json!({"recipeId": 5}),
        ))
        .await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            "alice",
            serde_json::json!({"recipeId": 5}),
        ))
        .await?;
    assert_eq!(second.status(), StatusCode::OK);

    let listing = app.oneshot(get("/api/favorites", "alice")).await?;
    let body = body_json(listing).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["isFavorite"], true);
    Ok(())
}

#[tokio::test]
async fn test_unfavorite_missing_recipe_is_404() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/favorites/999")
                .header("x-user-id", "alice")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["message"], "Recipe not found in favorites");
    Ok(())
}

#[tokio::test]
async fn test_favorites_are_isolated_by_user_header() -> Result<()> {
    let app = test_app().await?;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            "alice",
            serde_json::json!({"recipeId": 7}),
        ))
        .await?;

    let bobs = app.oneshot(get("/api/favorites", "bob")).await?;
    let body = body_json(bobs).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn test_shopping_item_lifecycle() -> Result<()> {
    let app = test_app().await?;

    // Add
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/shopping-list",
            "alice",
            serde_json::json!({"name": "Milk", "amount": 1.0, "unit": "liter"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let item = body_json(response).await?;
    assert_eq!(item["name"], "Milk");
    let item_id = item["id"].as_str().map(str::to_owned).expect("item id");

    // Update
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/shopping-list/{item_id}"),
            "alice",
            serde_json::json!({"purchased": true}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await?;
    assert_eq!(updated["purchased"], true);
    assert_eq!(updated["name"], "Milk");

    // Remove
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/shopping-list/{item_id}"))
                .header("x-user-id", "alice")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = app.oneshot(get("/api/shopping-list", "alice")).await?;
    let body = body_json(listing).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn test_shopping_item_requires_fields() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/shopping-list",
            "alice",
            serde_json::json!({"name": "Milk"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["message"], "Name, amount, and unit are required");
    Ok(())
}

#[tokio::test]
async fn test_shopping_bulk_rejects_non_array() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/shopping-list/bulk",
            "alice",
            serde_json::json!({"items": "not-an-array"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["message"], "Items must be an array");
    Ok(())
}

#[tokio::test]
async fn test_shopping_clear_purchased_keeps_rest() -> Result<()> {
    let app = test_app().await?;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/shopping-list/bulk",
            "alice",
            serde_json::json!({"items": [
                {"name": "Flour", "amount": 1.0, "unit": "kg"},
                {"name": "Eggs", "amount": 12.0, "unit": "pieces", "purchased": true}
            ]}),
        ))
        .await?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/shopping-list/clear/purchased")
                .header("x-user-id", "alice")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = app.oneshot(get("/api/shopping-list", "alice")).await?;
    let body = body_json(listing).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Flour");
    Ok(())
}

#[tokio::test]
async fn test_shopping_from_recipe_imports_ingredients() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/shopping-list/from-recipe/9",
            "alice",
            serde_json::json!({}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let items = body_json(response).await?;
    assert_eq!(items.as_array().map(Vec::len), Some(1));
    assert_eq!(items[0]["name"], "flour");
    assert_eq!(items[0]["recipeId"], 9);
    assert_eq!(items[0]["recipeName"], "Recipe 9");
    Ok(())
}

#[tokio::test]
async fn test_auth_register_login_profile_flow() -> Result<()> {
    let app = test_app().await?;

    // Register
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            "anonymous",
            serde_json::json!({
                "email": "remy@gusteaus.example",
                "password": "anyone-can-cook",
                "displayName": "Remy"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Login
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            "anonymous",
            serde_json::json!({
                "email": "remy@gusteaus.example",
                "password": "anyone-can-cook"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let token = body["tokens"]["accessToken"]
        .as_str()
        .map(str::to_owned)
        .expect("access token");

    // Profile with bearer token
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/profile")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["user"]["email"], "remy@gusteaus.example");
    assert_eq!(body["user"]["displayName"], "Remy");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() -> Result<()> {
    let app = test_app().await?;
    let payload = serde_json::json!({
        "email": "remy@gusteaus.example",
        "password": "anyone-can-cook"
    });

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            "anonymous",
            payload.clone(),
        ))
        .await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/api/auth/register", "anonymous", payload))
        .await?;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = body_json(second).await?;
    assert_eq!(body["error"]["code"], "USER_EXISTS");
    Ok(())
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() -> Result<()> {
    let app = test_app().await?;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            "anonymous",
            serde_json::json!({
                "email": "remy@gusteaus.example",
                "password": "anyone-can-cook"
            }),
        ))
        .await?;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            "anonymous",
            serde_json::json!({
                "email": "remy@gusteaus.example",
                "password": "nobody-can-cook"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    Ok(())
}

#[tokio::test]
async fn test_profile_rejects_bad_bearer() -> Result<()> {
    let app = test_app().await?;

    // No Authorization header at all
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/auth/profile").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/profile")
                .header("authorization", "Bearer not-a-real-token")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_register_requires_credentials() -> Result<()> {
    let app = test_app().await?;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/register",
            "anonymous",
            serde_json::json!({"email": "remy@gusteaus.example"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await?;
    assert_eq!(body["error"]["message"], "Email and password are required");
    Ok(())
}
