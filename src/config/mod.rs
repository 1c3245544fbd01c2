// ABOUTME: Configuration management module for centralized server settings and parameters
// ABOUTME: Handles environment-derived configuration for all server components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module for the Remy recipe server
//!
//! Provides centralized configuration management sourced from environment
//! variables: server ports, database location, upstream API credentials,
//! cache backend selection, and authentication secrets.

/// Environment and server configuration
pub mod environment;

pub use environment::ServerConfig;
