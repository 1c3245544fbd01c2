// ABOUTME: Main library entry point for the Remy recipe API server
// ABOUTME: Provides a cached Spoonacular proxy with favorites, shopping lists, and auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

// Zero-tolerance unsafe policy: nothing in this server needs unsafe code.
#![deny(unsafe_code)]

//! # Remy Recipe Server
//!
//! A recipe search backend that proxies the Spoonacular API with response
//! caching, per-user favorites, per-user shopping lists, and JWT-based
//! account management.
//!
//! ## Features
//!
//! - **Cached recipe lookup**: Search, detail, similar, and by-ingredients
//!   responses are cached with a configurable TTL; random lookups never are
//! - **Pluggable cache backends**: In-memory LRU by default, Redis when
//!   `REDIS_URL` is set
//! - **Per-user state**: Favorites and shopping lists keyed by the
//!   `x-user-id` header, falling back to a shared anonymous identity
//! - **Account management**: Registration, login, and profile endpoints
//!   backed by SQLite with bcrypt password hashing and HS256 token pairs
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use remy::config::environment::ServerConfig;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("Remy recipe server configured with port: HTTP={}",
//!              config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the server binary (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// JWT authentication and account management
pub mod auth;

/// Cache abstraction layer with pluggable backends
pub mod cache;

/// Environment-based configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// SQLite persistence for user accounts
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Core data models for recipes, shopping items, and users
pub mod models;

/// Upstream recipe provider clients
pub mod providers;

/// HTTP route handlers and router assembly
pub mod routes;

/// Server lifecycle and shared resources
pub mod server;

/// Domain services: cached recipe lookup, favorites, shopping lists
pub mod services;
