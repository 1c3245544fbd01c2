// ABOUTME: Cached recipe lookup service wrapping the upstream provider
// ABOUTME: Implements get-or-populate with TTL and graceful cache degradation
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::cache::factory::Cache;
use crate::cache::{CacheKey, RecipeResource};
use crate::constants::limits;
use crate::errors::AppResult;
use crate::models::{Recipe, SearchParams, SearchResults};
use crate::providers::RecipeProvider;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Recipe lookup service with upstream response caching
///
/// Every lookup follows the same protocol: derive the cache key from the
/// normalized parameters, try the cache, and on a miss call the provider and
/// populate the cache with the configured TTL. Cache failures are logged and
/// treated as misses so a degraded cache backend never blocks lookups.
/// Random recipe lookups bypass the cache entirely.
pub struct RecipeService {
    provider: Arc<dyn RecipeProvider>,
    cache: Cache,
    cache_ttl: Duration,
}

impl RecipeService {
    /// Create a new service over the given provider and cache
    pub fn new(provider: Arc<dyn RecipeProvider>, cache: Cache, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache,
            cache_ttl,
        }
    }

    /// Search recipes with filters and pagination
    ///
    /// Absent `number` and `offset` are filled with their defaults before
    /// key derivation, so a request that omits them and one that spells
    /// them out hit the same cache entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails on a cache miss
    pub async fn search(&self, params: SearchParams) -> AppResult<SearchResults> {
        let params = Self::normalize(params);
        let key = self.key(RecipeResource::Search {
            params: params.clone(),
        });

        if let Some(cached) = self.cache_get::<SearchResults>(&key).await {
            return Ok(cached);
        }

        let results = self.provider.search_recipes(&params).await?;
        self.cache_put(&key, &results).await;
        Ok(results)
    }

    /// Fetch a single recipe with full information
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the recipe does not exist upstream
    pub async fn get_recipe(&self, recipe_id: u64) -> AppResult<Recipe> {
        let key = self.key(RecipeResource::Recipe { recipe_id });

        if let Some(cached) = self.cache_get::<Recipe>(&key).await {
            return Ok(cached);
        }

        let recipe = self.provider.get_recipe_by_id(recipe_id).await?;
        self.cache_put(&key, &recipe).await;
        Ok(recipe)
    }

    /// Fetch recipes similar to the given recipe
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails on a cache miss
    pub async fn get_similar(&self, recipe_id: u64, limit: Option<u32>) -> AppResult<Vec<Recipe>> {
        let limit = limit.unwrap_or(limits::DEFAULT_SIMILAR_LIMIT);
        let key = self.key(RecipeResource::Similar { recipe_id, limit });

        if let Some(cached) = self.cache_get::<Vec<Recipe>>(&key).await {
            return Ok(cached);
        }

        let recipes = self.provider.get_similar_recipes(recipe_id, limit).await?;
        self.cache_put(&key, &recipes).await;
        Ok(recipes)
    }

    /// Find recipes that use the given ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails on a cache miss
    pub async fn get_by_ingredients(
        &self,
        ingredients: Vec<String>,
        number: Option<u32>,
    ) -> AppResult<Vec<Recipe>> {
        let number = number.unwrap_or(limits::DEFAULT_BY_INGREDIENTS_COUNT);
        let key = self.key(RecipeResource::ByIngredients {
            ingredients: ingredients.clone(),
            number,
        });

        if let Some(cached) = self.cache_get::<Vec<Recipe>>(&key).await {
            return Ok(cached);
        }

        let recipes = self
            .provider
            .get_recipes_by_ingredients(&ingredients, number)
            .await?;
        self.cache_put(&key, &recipes).await;
        Ok(recipes)
    }

    /// Fetch random recipes
    ///
    /// Never cached: callers expect fresh results on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    pub async fn get_random(&self, number: Option<u32>, tags: Option<&str>) -> AppResult<Vec<Recipe>> {
        let number = number.unwrap_or(limits::DEFAULT_RANDOM_COUNT);
        self.provider.get_random_recipes(number, tags).await
    }

    /// Invalidate every cached entry for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the cache backend rejects the pattern operation
    pub async fn invalidate_provider_cache(&self) -> AppResult<u64> {
        self.cache
            .invalidate_pattern(&CacheKey::provider_pattern(self.provider.name()))
            .await
    }

    fn key(&self, resource: RecipeResource) -> CacheKey {
        CacheKey::new(self.provider.name().to_owned(), resource)
    }

    /// Fill pagination defaults so absent and explicit defaults share cache keys
    fn normalize(mut params: SearchParams) -> SearchParams {
        params.number = Some(params.number.unwrap_or(limits::DEFAULT_SEARCH_PAGE_SIZE));
        params.offset = Some(params.offset.unwrap_or(limits::DEFAULT_SEARCH_OFFSET));
        params
    }

    /// Cache read that degrades to a miss on backend failure
    async fn cache_get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!(%key, "cache hit");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(%key, "cache read failed, falling through to upstream: {e}");
                None
            }
        }
    }

    /// Cache write that logs and continues on backend failure
    async fn cache_put<T: Serialize + Send + Sync>(&self, key: &CacheKey, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.cache_ttl).await {
            warn!(%key, "cache write failed, serving upstream response uncached: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fills_pagination_defaults() {
        let params = RecipeService::normalize(SearchParams {
            query: Some("pasta".into()),
            ..SearchParams::default()
        });
        assert_eq!(params.number, Some(limits::DEFAULT_SEARCH_PAGE_SIZE));
        assert_eq!(params.offset, Some(limits::DEFAULT_SEARCH_OFFSET));
    }

    #[test]
    fn test_normalize_preserves_explicit_pagination() {
        let params = RecipeService::normalize(SearchParams {
            number: Some(25),
            offset: Some(50),
            ..SearchParams::default()
        });
        assert_eq!(params.number, Some(25));
        assert_eq!(params.offset, Some(50));
    }
}
