// ABOUTME: Cache abstraction layer for upstream recipe API response caching
// ABOUTME: Pluggable backend support (in-memory, Redis) behind a shared provider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Cache factory for creating cache providers
pub mod factory;
/// In-memory cache implementation
pub mod memory;
/// Redis cache implementation
pub mod redis;

use crate::config::environment::RedisConnectionConfig;
use crate::constants::cache::RECIPE_NAMESPACE;
use crate::constants::{limits, timeouts};
use crate::errors::AppResult;
use crate::models::SearchParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// # Examples
///
/// ```rust,no_run
/// use remy::cache::memory::InMemoryCache;
/// use remy::cache::{CacheConfig, CacheKey, CacheProvider, RecipeResource};
/// use std::time::Duration;
/// # async fn example() -> Result<(), remy::errors::AppError> {
///
/// // Create cache with default configuration
/// let config = CacheConfig {
///     enable_background_cleanup: false, // Disable for example
///     ..Default::default()
/// };
/// let cache: InMemoryCache = InMemoryCache::new(config).await?;
///
/// // Create a cache key for a single recipe lookup
/// let key = CacheKey::new(
///     "spoonacular".to_owned(),
///     RecipeResource::Recipe { recipe_id: 716_429 },
/// );
///
/// // Store data in cache with a one hour TTL
/// cache.set(&key, &"cached_payload", Duration::from_secs(3600)).await?;
///
/// // Retrieve data from cache (returns None if absent or expired)
/// let cached: Option<String> = cache.get(&key).await?;
/// if let Some(payload) = cached {
///     println!("Found cached payload: {payload}");
/// }
///
/// // Invalidate cache entry
/// cache.invalidate(&key).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Remove all cache entries matching pattern (e.g., "recipes:spoonacular:*")
    ///
    /// # Errors
    ///
    /// Returns an error if pattern invalidation fails
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries (for testing/admin)
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries (for in-memory cache)
    pub max_entries: usize,
    /// Redis connection URL (for Redis cache)
    pub redis_url: Option<String>,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// Redis connection and retry configuration
    pub redis_connection: RedisConnectionConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: limits::DEFAULT_CACHE_MAX_ENTRIES,
            redis_url: None,
            cleanup_interval: Duration::from_secs(timeouts::CACHE_CLEANUP_INTERVAL_SECS),
            // Default to enabled - production code should use background cleanup
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
            redis_connection: RedisConnectionConfig::default(),
        }
    }
}

/// Structured cache key for upstream recipe lookups
///
/// Keys are derived from the operation and its parameter set, never from the
/// requesting user: recipe payloads are identical for every caller, and the
/// per-user favorite flag is attached after the cache layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Upstream provider name
    pub provider: String,
    /// Specific lookup being cached
    pub resource: RecipeResource,
}

impl CacheKey {
    /// Create new cache key
    #[must_use]
    pub const fn new(provider: String, resource: RecipeResource) -> Self {
        Self { provider, resource }
    }

    /// Create pattern for invalidating all entries for a provider
    #[must_use]
    pub fn provider_pattern(provider: &str) -> String {
        format!("{RECIPE_NAMESPACE}:{provider}:*")
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RECIPE_NAMESPACE}:{}:{}", self.provider, self.resource)
    }
}

/// Cache resource types with specific parameters
///
/// The `Display` rendering is the canonical key encoding: operation name
/// first, then `field:value` segments in declaration order, optional fields
/// rendered only when present. Two semantically identical parameter sets
/// therefore produce byte-identical keys, and distinct operations can never
/// collide because each starts with a distinct operation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecipeResource {
    /// Filtered recipe search with pagination
    Search {
        /// Normalized search filters (page size and offset filled in)
        params: SearchParams,
    },
    /// Single recipe with full information
    Recipe {
        /// Upstream recipe ID
        recipe_id: u64,
    },
    /// Recipes similar to a given recipe
    Similar {
        /// Upstream recipe ID
        recipe_id: u64,
        /// Maximum number of similar recipes
        limit: u32,
    },
    /// Recipes matching a set of available ingredients
    ByIngredients {
        /// Ingredient names in caller-supplied order
        ingredients: Vec<String>,
        /// Maximum number of results
        number: u32,
    },
}

impl fmt::Display for RecipeResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search { params } => {
                write!(f, "search")?;
                if let Some(query) = &params.query {
                    write!(f, ":query:{query}")?;
                }
                if let Some(cuisine) = &params.cuisine {
                    write!(f, ":cuisine:{cuisine}")?;
                }
                if let Some(diet) = &params.diet {
                    write!(f, ":diet:{diet}")?;
                }
                if let Some(intolerances) = &params.intolerances {
                    write!(f, ":intolerances:{intolerances}")?;
                }
                if let Some(meal_type) = &params.meal_type {
                    write!(f, ":type:{meal_type}")?;
                }
                if let Some(max_ready_time) = params.max_ready_time {
                    write!(f, ":max_ready_time:{max_ready_time}")?;
                }
                if let Some(min_calories) = params.min_calories {
                    write!(f, ":min_calories:{min_calories}")?;
                }
                if let Some(max_calories) = params.max_calories {
                    write!(f, ":max_calories:{max_calories}")?;
                }
                if let Some(min_protein) = params.min_protein {
                    write!(f, ":min_protein:{min_protein}")?;
                }
                if let Some(max_protein) = params.max_protein {
                    write!(f, ":max_protein:{max_protein}")?;
                }
                if let Some(min_carbs) = params.min_carbs {
                    write!(f, ":min_carbs:{min_carbs}")?;
                }
                if let Some(max_carbs) = params.max_carbs {
                    write!(f, ":max_carbs:{max_carbs}")?;
                }
                if let Some(min_fat) = params.min_fat {
                    write!(f, ":min_fat:{min_fat}")?;
                }
                if let Some(max_fat) = params.max_fat {
                    write!(f, ":max_fat:{max_fat}")?;
                }
                if let Some(number) = params.number {
                    write!(f, ":number:{number}")?;
                }
                if let Some(offset) = params.offset {
                    write!(f, ":offset:{offset}")?;
                }
                Ok(())
            }
            Self::Recipe { recipe_id } => write!(f, "recipe:{recipe_id}"),
            Self::Similar { recipe_id, limit } => {
                write!(f, "similar:{recipe_id}:limit:{limit}")
            }
            Self::ByIngredients {
                ingredients,
                number,
            } => {
                write!(
                    f,
                    "by_ingredients:{}:number:{number}",
                    ingredients.join(",")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_params_render_identical_keys() {
        let params = SearchParams {
            query: Some("pasta".into()),
            cuisine: Some("italian".into()),
            number: Some(10),
            offset: Some(0),
            ..SearchParams::default()
        };
        let a = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::Search {
                params: params.clone(),
            },
        );
        let b = CacheKey::new("spoonacular".into(), RecipeResource::Search { params });
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_different_operations_never_collide() {
        let recipe = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::Recipe { recipe_id: 5 },
        );
        let similar = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::Similar {
                recipe_id: 5,
                limit: 3,
            },
        );
        assert_ne!(recipe.to_string(), similar.to_string());
        assert!(recipe.to_string().starts_with("recipes:spoonacular:recipe:"));
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let key = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::Search {
                params: SearchParams {
                    query: Some("soup".into()),
                    number: Some(10),
                    offset: Some(0),
                    ..SearchParams::default()
                },
            },
        );
        let rendered = key.to_string();
        assert_eq!(
            rendered,
            "recipes:spoonacular:search:query:soup:number:10:offset:0"
        );
        assert!(!rendered.contains("cuisine"));
    }

    #[test]
    fn test_ingredient_order_is_preserved() {
        let key = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::ByIngredients {
                ingredients: vec!["tomato".into(), "basil".into()],
                number: 10,
            },
        );
        assert_eq!(
            key.to_string(),
            "recipes:spoonacular:by_ingredients:tomato,basil:number:10"
        );
    }

    #[test]
    fn test_provider_pattern_matches_rendered_keys() {
        let key = CacheKey::new(
            "spoonacular".into(),
            RecipeResource::Recipe { recipe_id: 99 },
        );
        let pattern = glob::Pattern::new(&CacheKey::provider_pattern("spoonacular")).unwrap();
        assert!(pattern.matches(&key.to_string()));
    }
}
