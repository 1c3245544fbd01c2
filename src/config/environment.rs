// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config, limits, timeouts};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Check if this is a testing environment
    pub fn is_testing(&self) -> bool {
        matches!(self, Environment::Testing)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            DatabaseUrl::Memory
        } else {
            DatabaseUrl::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    pub fn to_connection_string(&self) -> String {
        match self {
            DatabaseUrl::SQLite { path } => format!("sqlite:{}", path.display()),
            DatabaseUrl::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        matches!(self, DatabaseUrl::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        DatabaseUrl::parse_url(defaults::DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration assembled from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Upstream recipe API configuration
    pub spoonacular: SpoonacularConfig,
    /// Response cache configuration
    pub cache: CacheSettings,
    /// Security settings
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or in-memory)
    pub url: DatabaseUrl,
    /// Run schema migration on startup
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Access token signing secret
    pub jwt_secret: String,
    /// Access token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// Refresh token signing secret
    pub jwt_refresh_secret: String,
    /// Refresh token lifetime in hours
    pub jwt_refresh_expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoonacularConfig {
    /// Upstream API key; requests fail upstream-auth without it
    pub api_key: Option<String>,
    /// Upstream base URL
    pub base_url: String,
    /// Recipe response cache TTL in seconds
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Redis connection URL; `None` selects the in-memory backend
    pub redis_url: Option<String>,
    /// Maximum entries held by the in-memory backend
    pub max_entries: usize,
    /// Background sweep interval for expired entries, in seconds
    pub cleanup_interval_secs: u64,
}

/// Redis connection and retry tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConnectionConfig {
    /// Timeout for establishing a connection, in seconds
    pub connection_timeout_secs: u64,
    /// Timeout for individual command responses, in seconds
    pub response_timeout_secs: u64,
    /// Retries attempted during initial startup connection
    pub initial_connection_retries: u64,
    /// Delay before the first startup retry, in milliseconds
    pub initial_retry_delay_ms: u64,
    /// Cap on retry delay growth, in milliseconds
    pub max_retry_delay_ms: u64,
    /// Retries the connection manager performs after a dropped connection
    pub reconnection_retries: usize,
    /// Exponent base for the manager's backoff between reconnection attempts
    pub retry_exponent_base: u64,
}

impl Default for RedisConnectionConfig {
    fn default() -> Self {
        Self {
            connection_timeout_secs: 5,
            response_timeout_secs: 2,
            initial_connection_retries: 3,
            initial_retry_delay_ms: 100,
            max_retry_delay_ms: 5000,
            reconnection_retries: 6,
            retry_exponent_base: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed CORS origin for the frontend
    pub cors_origin: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = ServerConfig {
            http_port: env_config::http_port(),
            environment: Environment::from_str_or_default(&env_config::environment()),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_config::database_url()),
                auto_migrate: env_var_or("AUTO_MIGRATE", "true")?
                    .parse()
                    .context("Invalid AUTO_MIGRATE value")?,
            },

            auth: AuthConfig {
                jwt_secret: env_config::jwt_secret(),
                jwt_expiry_hours: env_config::jwt_expiry_hours(),
                jwt_refresh_secret: env_config::jwt_refresh_secret(),
                jwt_refresh_expiry_hours: env_config::jwt_refresh_expiry_hours(),
            },

            spoonacular: SpoonacularConfig {
                api_key: env_config::spoonacular_api_key(),
                base_url: env_config::spoonacular_base_url(),
                cache_ttl_secs: env_config::spoonacular_cache_ttl(),
            },

            cache: CacheSettings {
                redis_url: env_config::redis_url(),
                max_entries: env_var_or(
                    "CACHE_MAX_ENTRIES",
                    &limits::DEFAULT_CACHE_MAX_ENTRIES.to_string(),
                )?
                .parse()
                .context("Invalid CACHE_MAX_ENTRIES value")?,
                cleanup_interval_secs: env_var_or(
                    "CACHE_CLEANUP_INTERVAL",
                    &timeouts::CACHE_CLEANUP_INTERVAL_SECS.to_string(),
                )?
                .parse()
                .context("Invalid CACHE_CLEANUP_INTERVAL value")?,
            },

            security: SecurityConfig {
                cors_origin: env_config::cors_origin(),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Problems are fatal in production and downgraded to warnings in
    /// development, matching the deployment model where local runs are
    /// expected to work with partial configuration.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.spoonacular.api_key.is_none() {
            problems.push("SPOONACULAR_API_KEY is not set".to_string());
        }

        if self.environment.is_production() {
            if self.auth.jwt_secret == defaults::JWT_SECRET {
                problems.push("JWT_SECRET must be changed in production".to_string());
            }
            if self.auth.jwt_refresh_secret == defaults::JWT_REFRESH_SECRET {
                problems.push("JWT_REFRESH_SECRET must be changed in production".to_string());
            }
        }

        if self.auth.jwt_expiry_hours <= 0 || self.auth.jwt_refresh_expiry_hours <= 0 {
            problems.push("JWT expiry hours must be positive".to_string());
        }

        if problems.is_empty() {
            return Ok(());
        }

        for problem in &problems {
            warn!("Configuration problem: {problem}");
        }

        if self.environment.is_production() {
            Err(anyhow::anyhow!(
                "Invalid production configuration: {}",
                problems.join(", ")
            ))
        } else {
            warn!("Running with default development configuration");
            Ok(())
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    pub fn summary(&self) -> String {
        format!(
            "Remy Recipe Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Upstream API Key: {}\n\
             - Cache Backend: {}\n\
             - Cache TTL: {}s\n\
             - CORS Origin: {}",
            self.http_port,
            self.environment,
            self.log_level,
            self.database.url,
            if self.spoonacular.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
            if self.cache.redis_url.is_some() {
                "Redis"
            } else {
                "In-Memory"
            },
            self.spoonacular.cache_ttl_secs,
            self.security.cors_origin,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}
