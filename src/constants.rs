// ABOUTME: System-wide constants and configuration values for the Remy recipe API
// ABOUTME: Contains route paths, defaults, limits, and environment variable accessors
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Centralized definitions for defaults, limits, route paths, and
//! environment variable access so values stay consistent between the
//! server, the banner output, and the tests.

use std::env;

/// Network ports
pub mod ports {
    /// Default `HTTP` server port
    pub const DEFAULT_HTTP_PORT: u16 = 3001;
}

/// `HTTP` route path prefixes
pub mod routes {
    /// Recipe search and lookup endpoints
    pub const API_RECIPES: &str = "/api/recipes";
    /// Per-user favorites endpoints
    pub const API_FAVORITES: &str = "/api/favorites";
    /// Per-user shopping list endpoints
    pub const API_SHOPPING_LIST: &str = "/api/shopping-list";
    /// Registration, login, and profile endpoints
    pub const API_AUTH: &str = "/api/auth";
    /// Service health endpoint
    pub const HEALTH: &str = "/health";
}

/// Request identity conventions
pub mod identity {
    /// Header carrying the caller-supplied user identifier
    pub const USER_ID_HEADER: &str = "x-user-id";
    /// Identity assumed when the header is absent
    pub const ANONYMOUS_USER: &str = "anonymous";
}

/// Operational limits and page-size defaults
pub mod limits {
    /// Default number of results for a recipe search
    pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;
    /// Default pagination offset for a recipe search
    pub const DEFAULT_SEARCH_OFFSET: u32 = 0;
    /// Default number of similar recipes returned
    pub const DEFAULT_SIMILAR_LIMIT: u32 = 3;
    /// Default number of results for ingredient-based search
    pub const DEFAULT_BY_INGREDIENTS_COUNT: u32 = 10;
    /// Default number of random recipes returned
    pub const DEFAULT_RANDOM_COUNT: u32 = 10;
    /// Default maximum entries held by the in-memory cache
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;
}

/// Cache key conventions
pub mod cache {
    /// Prefix applied to every backend key so a shared Redis instance can
    /// be flushed without touching other applications' data
    pub const CACHE_KEY_PREFIX: &str = "remy:cache:";
    /// Namespace for recipe lookup keys
    pub const RECIPE_NAMESPACE: &str = "recipes";
}

/// Timeout and interval values in seconds
pub mod timeouts {
    /// Upstream recipe API request timeout
    pub const UPSTREAM_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Inbound request timeout applied by the router
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Interval between background sweeps for expired cache entries
    pub const CACHE_CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Default configuration values
pub mod defaults {
    /// Upstream recipe API base URL
    pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
    /// Recipe response cache TTL (one hour)
    pub const CACHE_TTL_SECS: u64 = 3600;
    /// Allowed CORS origin for the frontend
    pub const CORS_ORIGIN: &str = "http://localhost:3000";
    /// SQLite database location for user accounts
    pub const DATABASE_URL: &str = "sqlite:./data/users.db";
    /// Placeholder access token secret; rejected in production
    pub const JWT_SECRET: &str = "change-this-in-production";
    /// Placeholder refresh token secret; rejected in production
    pub const JWT_REFRESH_SECRET: &str = "change-this-refresh-secret";
    /// Access token lifetime in hours (7 days)
    pub const JWT_EXPIRY_HOURS: i64 = 168;
    /// Refresh token lifetime in hours (30 days)
    pub const JWT_REFRESH_EXPIRY_HOURS: i64 = 720;
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| crate::constants::ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .unwrap_or(crate::constants::ports::DEFAULT_HTTP_PORT)
    }

    /// Get deployment environment name from environment or default
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into())
    }

    /// Get database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| crate::constants::defaults::DATABASE_URL.into())
    }

    /// Get upstream API key from environment
    #[must_use]
    pub fn spoonacular_api_key() -> Option<String> {
        env::var("SPOONACULAR_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    }

    /// Get upstream API base `URL` from environment or default
    #[must_use]
    pub fn spoonacular_base_url() -> String {
        env::var("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|_| crate::constants::defaults::SPOONACULAR_BASE_URL.into())
    }

    /// Get recipe cache TTL in seconds from environment or default
    #[must_use]
    pub fn spoonacular_cache_ttl() -> u64 {
        env::var("SPOONACULAR_CACHE_TTL")
            .unwrap_or_else(|_| crate::constants::defaults::CACHE_TTL_SECS.to_string())
            .parse()
            .unwrap_or(crate::constants::defaults::CACHE_TTL_SECS)
    }

    /// Get Redis `URL` from environment; absent means in-memory caching
    #[must_use]
    pub fn redis_url() -> Option<String> {
        env::var("REDIS_URL").ok().filter(|u| !u.is_empty())
    }

    /// Get access token signing secret from environment or default
    #[must_use]
    pub fn jwt_secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| crate::constants::defaults::JWT_SECRET.into())
    }

    /// Get refresh token signing secret from environment or default
    #[must_use]
    pub fn jwt_refresh_secret() -> String {
        env::var("JWT_REFRESH_SECRET")
            .unwrap_or_else(|_| crate::constants::defaults::JWT_REFRESH_SECRET.into())
    }

    /// Get access token lifetime in hours from environment or default
    #[must_use]
    pub fn jwt_expiry_hours() -> i64 {
        env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| crate::constants::defaults::JWT_EXPIRY_HOURS.to_string())
            .parse()
            .unwrap_or(crate::constants::defaults::JWT_EXPIRY_HOURS)
    }

    /// Get refresh token lifetime in hours from environment or default
    #[must_use]
    pub fn jwt_refresh_expiry_hours() -> i64 {
        env::var("JWT_REFRESH_EXPIRY_HOURS")
            .unwrap_or_else(|_| crate::constants::defaults::JWT_REFRESH_EXPIRY_HOURS.to_string())
            .parse()
            .unwrap_or(crate::constants::defaults::JWT_REFRESH_EXPIRY_HOURS)
    }

    /// Get allowed CORS origin from environment or default
    #[must_use]
    pub fn cors_origin() -> String {
        env::var("CORS_ORIGIN").unwrap_or_else(|_| crate::constants::defaults::CORS_ORIGIN.into())
    }
}
