// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Run serially because they mutate process environment variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use remy::config::environment::{Environment, ServerConfig};
use serial_test::serial;
use std::env;

const MANAGED_VARS: &[&str] = &[
    "PORT",
    "ENVIRONMENT",
    "SPOONACULAR_API_KEY",
    "SPOONACULAR_CACHE_TTL",
    "REDIS_URL",
    "CORS_ORIGIN",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_REFRESH_SECRET",
];

fn clear_managed_vars() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_managed_vars();
    env::set_var("ENVIRONMENT", "development");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 3001);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.spoonacular.cache_ttl_secs, 3600);
    assert!(config.cache.redis_url.is_none());
    assert_eq!(config.security.cors_origin, "http://localhost:3000");

    clear_managed_vars();
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_managed_vars();
    env::set_var("ENVIRONMENT", "development");
    env::set_var("PORT", "8080");
    env::set_var("SPOONACULAR_API_KEY", "test-key");
    env::set_var("SPOONACULAR_CACHE_TTL", "120");
    env::set_var("REDIS_URL", "redis://localhost:6379");
    env::set_var("CORS_ORIGIN", "https://remy.example");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.spoonacular.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.spoonacular.cache_ttl_secs, 120);
    assert_eq!(
        config.cache.redis_url.as_deref(),
        Some("redis://localhost:6379")
    );
    assert_eq!(config.security.cors_origin, "https://remy.example");

    clear_managed_vars();
}

#[test]
#[serial]
fn test_empty_api_key_treated_as_missing() {
    clear_managed_vars();
    env::set_var("ENVIRONMENT", "development");
    env::set_var("SPOONACULAR_API_KEY", "");

    let config = ServerConfig::from_env().unwrap();
    assert!(config.spoonacular.api_key.is_none());

    clear_managed_vars();
}

#[test]
#[serial]
fn test_production_rejects_default_secrets() {
    clear_managed_vars();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SPOONACULAR_API_KEY", "prod-key");

    // Default JWT secrets are a fatal misconfiguration in production
    assert!(ServerConfig::from_env().is_err());

    clear_managed_vars();
}
