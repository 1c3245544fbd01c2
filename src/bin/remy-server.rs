// ABOUTME: Server binary wiring configuration, storage, cache, and routes together
// ABOUTME: Production entry point for the Remy recipe API
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Remy Recipe Server Binary
//!
//! Starts the HTTP API with the cached Spoonacular proxy, per-user
//! favorites and shopping lists, and JWT account management.

use anyhow::Result;
use clap::Parser;
use remy::{
    auth::AuthManager,
    cache::{factory::Cache, CacheConfig},
    config::environment::ServerConfig,
    constants::routes,
    database::Database,
    logging,
    providers::SpoonacularProvider,
    server::{self, ServerResources},
    services::RecipeService,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "remy-server")]
#[command(about = "Remy Recipe API - Cached recipe search with favorites and shopping lists")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args { http_port: None }
        }
    };

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Override port if specified
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Remy Recipe API");
    info!("{}", config.summary());

    // Initialize user database
    let database = Database::new(&config.database.url.to_connection_string())
        .await
        .map_err(|e| anyhow::anyhow!("Database initialization failed: {e}"))?;
    if config.database.auto_migrate {
        database
            .migrate()
            .await
            .map_err(|e| anyhow::anyhow!("Database migration failed: {e}"))?;
    }
    info!("Database ready: {}", config.database.url);

    // Initialize response cache (Redis when configured, in-memory otherwise)
    let cache = Cache::new(CacheConfig {
        max_entries: config.cache.max_entries,
        redis_url: config.cache.redis_url.clone(),
        cleanup_interval: Duration::from_secs(config.cache.cleanup_interval_secs),
        enable_background_cleanup: true,
        redis_connection: remy::config::environment::RedisConnectionConfig::default(),
    })
    .await
    .map_err(|e| anyhow::anyhow!("Cache initialization failed: {e}"))?;
    info!("Cache backend ready: {}", cache.backend_name());

    // Wire the upstream provider into the cached lookup service
    let provider = SpoonacularProvider::new(&config.spoonacular)
        .map_err(|e| anyhow::anyhow!("Upstream provider initialization failed: {e}"))?;
    let recipe_service = Arc::new(RecipeService::new(
        Arc::new(provider),
        cache.clone(),
        Duration::from_secs(config.spoonacular.cache_ttl_secs),
    ));

    // Initialize authentication manager
    let auth_manager = AuthManager::new(database.clone(), config.auth.clone());
    info!("Authentication manager initialized");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        Arc::new(config),
        database,
        auth_manager,
        recipe_service,
        cache,
    ));

    display_available_endpoints(http_port);

    info!("Ready to serve recipes!");

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints with their ports
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let base = format!("http://{host}:{port}");
    let recipes = routes::API_RECIPES;
    let favorites = routes::API_FAVORITES;
    let shopping = routes::API_SHOPPING_LIST;
    let auth = routes::API_AUTH;
    let health = routes::HEALTH;

    info!("=== Available API Endpoints ===");
    info!("Recipes:");
    info!("   Search:          GET {base}{recipes}/search");
    info!("   Random:          GET {base}{recipes}/random");
    info!("   By Ingredients:  GET {base}{recipes}/by-ingredients");
    info!("   Detail:          GET {base}{recipes}/:id");
    info!("   Similar:         GET {base}{recipes}/:id/similar");
    info!("Favorites:");
    info!("   List:            GET {base}{favorites}");
    info!("   Add:             POST {base}{favorites}");
    info!("   Remove:          DELETE {base}{favorites}/:id");
    info!("   Clear:           DELETE {base}{favorites}/clear/all");
    info!("Shopping List:");
    info!("   List:            GET {base}{shopping}");
    info!("   Add:             POST {base}{shopping}");
    info!("   Bulk Add:        POST {base}{shopping}/bulk");
    info!("   From Recipe:     POST {base}{shopping}/from-recipe/:id");
    info!("   Update:          PUT {base}{shopping}/:id");
    info!("   Remove:          DELETE {base}{shopping}/:id");
    info!("Authentication:");
    info!("   Register:        POST {base}{auth}/register");
    info!("   Login:           POST {base}{auth}/login");
    info!("   Refresh:         POST {base}{auth}/refresh");
    info!("   Profile:         GET {base}{auth}/profile");
    info!("Health:");
    info!("   Status:          GET {base}{health}");
    info!("=== End of Endpoint List ===");
}
