// ABOUTME: User account queries over the SQLite pool
// ABOUTME: Manual row mapping with TEXT-encoded UUIDs and RFC 3339 timestamps
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Insert a new user account
    ///
    /// # Errors
    ///
    /// Returns `USER_EXISTS` when the email is already registered
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, is_active, created_at, last_active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(user.id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::user_exists(user.email.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Look up a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Record that the user was just seen
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_last_active(&self, user_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_active = ? WHERE id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;
        Ok(())
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id_str: String = row.try_get("id")?;
        let created_at_str: String = row.try_get("created_at")?;
        let last_active_str: String = row.try_get("last_active")?;

        Ok(User {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| AppError::database(format!("Invalid user id in database: {e}")))?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            password_hash: row.try_get("password_hash")?,
            is_active: row.try_get("is_active")?,
            created_at: parse_timestamp(&created_at_str)?,
            last_active: parse_timestamp(&last_active_str)?,
        })
    }
}

fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid timestamp in database: {e}")))
}
