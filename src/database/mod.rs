// ABOUTME: SQLite database layer for persistent user accounts
// ABOUTME: Owns the connection pool, schema migration, and health probing
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Database Layer
//!
//! SQLite-backed persistence for the auth subsystem. Only user accounts are
//! stored here; favorites and shopping lists are in-memory per-user state.

pub mod users;

use crate::errors::AppResult;
use sqlx::SqlitePool;
use tracing::info;

/// Database connection pool and query interface
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database, creating the SQLite file if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // mode=rwc creates the database file on first run
        let connect_url = if database_url.contains(":memory:") || database_url.contains('?') {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        let pool = SqlitePool::connect(&connect_url).await?;
        info!("Connected to database");

        Ok(Self { pool })
    }

    /// Run schema migrations
    ///
    /// Idempotent: every statement is `CREATE ... IF NOT EXISTS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Verify the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the probe query fails
    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Access the underlying pool
    pub(crate) const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
