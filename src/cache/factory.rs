// ABOUTME: Cache factory that selects the backend from configuration
// ABOUTME: Wraps in-memory and Redis providers behind one concrete facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::{memory::InMemoryCache, redis::RedisCache, CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Backend selected at startup
#[derive(Clone)]
enum CacheBackend {
    Memory(InMemoryCache),
    Redis(RedisCache),
}

/// Concrete cache facade used by server resources
///
/// `CacheProvider` has generic methods and cannot be boxed as a trait object,
/// so the facade dispatches over an internal backend enum instead. The backend
/// is chosen once at startup: Redis when `redis_url` is configured, in-memory
/// otherwise.
#[derive(Clone)]
pub struct Cache {
    backend: CacheBackend,
}

impl Cache {
    /// Create cache with backend selected from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if backend initialization fails (e.g., Redis unreachable)
    pub async fn new(config: CacheConfig) -> AppResult<Self> {
        let backend = if config.redis_url.is_some() {
            info!("Initializing Redis cache backend");
            CacheBackend::Redis(RedisCache::new(config).await?)
        } else {
            info!(
                "Initializing in-memory cache backend (max_entries={})",
                config.max_entries
            );
            CacheBackend::Memory(InMemoryCache::new(config).await?)
        };

        Ok(Self { backend })
    }

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    pub async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.set(key, value, ttl).await,
            CacheBackend::Redis(cache) => cache.set(key, value, ttl).await,
        }
    }

    /// Retrieve value from cache
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.get(key).await,
            CacheBackend::Redis(cache) => cache.get(key).await,
        }
    }

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    pub async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.invalidate(key).await,
            CacheBackend::Redis(cache) => cache.invalidate(key).await,
        }
    }

    /// Remove all cache entries matching pattern
    ///
    /// # Errors
    ///
    /// Returns an error if pattern invalidation fails
    pub async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.invalidate_pattern(pattern).await,
            CacheBackend::Redis(cache) => cache.invalidate_pattern(pattern).await,
        }
    }

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    pub async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.exists(key).await,
            CacheBackend::Redis(cache) => cache.exists(key).await,
        }
    }

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    pub async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.ttl(key).await,
            CacheBackend::Redis(cache) => cache.ttl(key).await,
        }
    }

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    pub async fn health_check(&self) -> AppResult<()> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.health_check().await,
            CacheBackend::Redis(cache) => cache.health_check().await,
        }
    }

    /// Clear all cache entries
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    pub async fn clear_all(&self) -> AppResult<()> {
        match &self.backend {
            CacheBackend::Memory(cache) => cache.clear_all().await,
            CacheBackend::Redis(cache) => cache.clear_all().await,
        }
    }

    /// Backend name for health reporting
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match &self.backend {
            CacheBackend::Memory(_) => "memory",
            CacheBackend::Redis(_) => "redis",
        }
    }
}
