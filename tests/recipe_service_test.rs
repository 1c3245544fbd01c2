// ABOUTME: Tests for the cached recipe lookup service using a counting mock provider
// ABOUTME: Verifies get-or-populate behavior, TTL expiry, and the random bypass
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use anyhow::Result;
use remy::cache::{factory::Cache, CacheConfig, CacheKey, RecipeResource};
use remy::config::environment::RedisConnectionConfig;
use remy::errors::AppResult;
use remy::models::{Recipe, SearchParams, SearchResults};
use remy::providers::RecipeProvider;
use remy::services::RecipeService;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock provider that counts upstream calls and returns canned payloads
#[derive(Default)]
struct CountingProvider {
    search_calls: AtomicU32,
    recipe_calls: AtomicU32,
    similar_calls: AtomicU32,
    by_ingredients_calls: AtomicU32,
    random_calls: AtomicU32,
}

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
        extended_ingredients: None,
        nutrition: None,
        is_favorite: None,
    }
}

#[async_trait::async_trait]
impl RecipeProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    async fn search_recipes(&self, _params: &SearchParams) -> AppResult<SearchResults> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SearchResults {
            results: vec![stub_recipe(1), stub_recipe(2)],
            total_results: 2,
        })
    }

    async fn get_recipe_by_id(&self, recipe_id: u64) -> AppResult<Recipe> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        Ok(stub_recipe(recipe_id))
    }

    async fn get_similar_recipes(&self, _recipe_id: u64, limit: u32) -> AppResult<Vec<Recipe>> {
        self.similar_calls.fetch_add(1, Ordering::SeqCst);
        Ok((100..100 + u64::from(limit)).map(stub_recipe).collect())
    }

    async fn get_recipes_by_ingredients(
        &self,
        _ingredients: &[String],
        _number: u32,
    ) -> AppResult<Vec<Recipe>> {
        self.by_ingredients_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![stub_recipe(7)])
    }

    async fn get_random_recipes(&self, number: u32, _tags: Option<&str>) -> AppResult<Vec<Recipe>> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..u64::from(number.min(3))).map(stub_recipe).collect())
    }
}

async fn test_service_with_cache(
    ttl: Duration,
) -> Result<(Arc<CountingProvider>, Cache, RecipeService)> {
    let provider = Arc::new(CountingProvider::default());
    let cache = Cache::new(CacheConfig {
        max_entries: 100,
        redis_url: None,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false,
        redis_connection: RedisConnectionConfig::default(),
    })
    .await?;

    let service = RecipeService::new(provider.clone(), cache.clone(), ttl);
    Ok((provider, cache, service))
}

async fn test_service(ttl: Duration) -> Result<(Arc<CountingProvider>, RecipeService)> {
    let (provider, _, service) = test_service_with_cache(ttl).await?;
    Ok((provider, service))
}

fn recipe_key(recipe_id: u64) -> CacheKey {
    CacheKey::new("spoonacular".to_string(), RecipeResource::Recipe { recipe_id })
}

#[tokio::test]
async fn test_repeated_search_hits_cache() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;
    let params = SearchParams {
        query: Some("pasta".into()),
        ..SearchParams::default()
    };

    let first = service.search(params.clone()).await?;
    let second = service.search(params).await?;

    assert_eq!(first.total_results, second.total_results);
    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_absent_pagination_shares_entry_with_explicit_defaults() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;

    // No pagination fields
    service
        .search(SearchParams {
            query: Some("soup".into()),
            ..SearchParams::default()
        })
        .await?;

    // Same search with defaults spelled out
    service
        .search(SearchParams {
            query: Some("soup".into()),
            number: Some(10),
            offset: Some(0),
            ..SearchParams::default()
        })
        .await?;

    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_different_pagination_is_a_different_entry() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;

    service
        .search(SearchParams {
            query: Some("soup".into()),
            ..SearchParams::default()
        })
        .await?;
    service
        .search(SearchParams {
            query: Some("soup".into()),
            offset: Some(10),
            ..SearchParams::default()
        })
        .await?;

    assert_eq!(provider.search_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_expired_entry_refetches() -> Result<()> {
    let (provider, service) = test_service(Duration::from_millis(50)).await?;

    service.get_recipe(42).await?;
    service.get_recipe(42).await?;
    assert_eq!(provider.recipe_calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;

    service.get_recipe(42).await?;
    assert_eq!(provider.recipe_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_distinct_recipes_cached_separately() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;

    service.get_recipe(1).await?;
    service.get_recipe(2).await?;
    service.get_recipe(1).await?;

    assert_eq!(provider.recipe_calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_random_is_never_cached() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;

    service.get_random(None, None).await?;
    service.get_random(None, None).await?;
    service.get_random(None, None).await?;

    assert_eq!(provider.random_calls.load(Ordering::SeqCst), 3);
    Ok(())
}

#[tokio::test]
async fn test_similar_default_limit_shares_entry_with_explicit() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;

    let defaulted = service.get_similar(5, None).await?;
    service.get_similar(5, Some(3)).await?;

    assert_eq!(defaulted.len(), 3);
    assert_eq!(provider.similar_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_undecodable_cache_entry_falls_through_to_upstream() -> Result<()> {
    let (provider, cache, service) = test_service_with_cache(Duration::from_secs(60)).await?;

    // Seed the entry the lookup will derive with a payload that cannot
    // deserialize as a recipe, so the read surfaces a cache error
    cache
        .set(&recipe_key(42), &"stale payload", Duration::from_secs(60))
        .await?;

    let recipe = service.get_recipe(42).await?;
    assert_eq!(recipe.id, 42);
    assert_eq!(provider.recipe_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_fallthrough_repopulates_cache_entry() -> Result<()> {
    let (provider, cache, service) = test_service_with_cache(Duration::from_secs(60)).await?;

    cache
        .set(&recipe_key(7), &"stale payload", Duration::from_secs(60))
        .await?;

    service.get_recipe(7).await?;

    // The upstream response replaced the bad entry, so this lookup is a hit
    let again = service.get_recipe(7).await?;
    assert_eq!(again.id, 7);
    assert_eq!(provider.recipe_calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn test_by_ingredients_is_cached() -> Result<()> {
    let (provider, service) = test_service(Duration::from_secs(60)).await?;
    let ingredients = vec!["tomato".to_string(), "basil".to_string()];

    service.get_by_ingredients(ingredients.clone(), None).await?;
    service.get_by_ingredients(ingredients.clone(), Some(10)).await?;

    // Reordered ingredients are a different lookup
    let reordered = vec!["basil".to_string(), "tomato".to_string()];
    service.get_by_ingredients(reordered, None).await?;

    assert_eq!(provider.by_ingredients_calls.load(Ordering::SeqCst), 2);
    Ok(())
}
