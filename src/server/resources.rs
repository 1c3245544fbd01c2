// ABOUTME: Shared server resources container for dependency injection
// ABOUTME: Centralizes construction of services shared across all routes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::cache::factory::Cache;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::{FavoritesStore, RecipeService, ShoppingListStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared resources threaded through every route handler
///
/// Constructed once at startup and cloned as an `Arc` into the router state.
/// Handlers never build their own connections or clients.
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// User account database
    pub database: Database,
    /// Authentication manager
    pub auth_manager: AuthManager,
    /// Cached recipe lookup service
    pub recipe_service: Arc<RecipeService>,
    /// Per-user favorites
    pub favorites: FavoritesStore,
    /// Per-user shopping lists
    pub shopping_list: ShoppingListStore,
    /// Response cache (exposed for health reporting)
    pub cache: Cache,
    /// Process start time for uptime reporting
    pub started_at: Instant,
}

impl ServerResources {
    /// Bundle the shared resources
    #[must_use]
    pub fn new(
        config: Arc<ServerConfig>,
        database: Database,
        auth_manager: AuthManager,
        recipe_service: Arc<RecipeService>,
        cache: Cache,
    ) -> Self {
        Self {
            config,
            database,
            auth_manager,
            recipe_service,
            favorites: FavoritesStore::new(),
            shopping_list: ShoppingListStore::new(),
            cache,
            started_at: Instant::now(),
        }
    }
}
