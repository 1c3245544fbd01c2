// ABOUTME: JWT-based user authentication for registration, login, and profile access
// ABOUTME: Handles password hashing, token pair generation, and bearer validation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication
//!
//! Account registration and login backed by the SQLite user store, with
//! HS256 token pairs. Access and refresh tokens are signed with separate
//! secrets so leaking one does not compromise the other. Only the profile
//! endpoint requires a bearer token; recipe, favorites, and shopping-list
//! routes identify callers through the `x-user-id` header instead.

use crate::config::environment::AuthConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by both access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (UUID string)
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,
    /// Expiry timestamp (Unix seconds)
    pub exp: i64,
}

/// Access and refresh token pair issued on registration and login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived token for API access
    pub access_token: String,
    /// Long-lived token for obtaining fresh pairs
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication manager over the user store
#[derive(Clone)]
pub struct AuthManager {
    database: Database,
    config: AuthConfig,
}

impl AuthManager {
    /// Create a new manager
    #[must_use]
    pub const fn new(database: Database, config: AuthConfig) -> Self {
        Self { database, config }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns `USER_EXISTS` when the email is taken, `INTERNAL_ERROR` if
    /// password hashing fails
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> AppResult<(User, TokenPair)> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let user = User::new(email.to_owned(), password_hash, display_name);
        self.database.create_user(&user).await?;

        let tokens = self.generate_token_pair(&user)?;
        Ok((user, tokens))
    }

    /// Authenticate with email and password
    ///
    /// Unknown email, wrong password, and deactivated accounts all return
    /// the same `INVALID_CREDENTIALS` error so login probing reveals nothing.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_CREDENTIALS` when authentication fails
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let user = self
            .database
            .get_user_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        let password_valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

        if !password_valid || !user.is_active {
            return Err(AppError::invalid_credentials());
        }

        self.database.update_last_active(user.id).await?;

        let tokens = self.generate_token_pair(&user)?;
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a fresh token pair
    ///
    /// # Errors
    ///
    /// Returns `TOKEN_EXPIRED` or `UNAUTHORIZED` for bad tokens, `NOT_FOUND`
    /// if the account has since been deleted
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = Self::decode_token(refresh_token, &self.config.jwt_refresh_secret)?;
        let user = self.user_from_claims(&claims).await?;
        let tokens = self.generate_token_pair(&user)?;
        Ok((user, tokens))
    }

    /// Validate an access token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `TOKEN_EXPIRED` for expired tokens, `UNAUTHORIZED` otherwise
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        Self::decode_token(token, &self.config.jwt_secret)
    }

    /// Resolve the account behind a validated set of claims
    ///
    /// # Errors
    ///
    /// Returns `NOT_FOUND` if the account no longer exists and
    /// `UNAUTHORIZED` if it was deactivated
    pub async fn user_from_claims(&self, claims: &Claims) -> AppResult<User> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized("Malformed user ID in token"))?;

        let user = self
            .database
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account is deactivated"));
        }

        Ok(user)
    }

    /// Issue an access and refresh token pair for the user
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` if token signing fails
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let access_ttl = Duration::hours(self.config.jwt_expiry_hours);
        let refresh_ttl = Duration::hours(self.config.jwt_refresh_expiry_hours);

        let access_token = Self::encode_token(user, access_ttl, &self.config.jwt_secret)?;
        let refresh_token =
            Self::encode_token(user, refresh_ttl, &self.config.jwt_refresh_secret)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: access_ttl.num_seconds(),
        })
    }

    fn encode_token(user: &User, ttl: Duration, secret: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Token signing failed: {e}")))
    }

    fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
            _ => AppError::unauthorized("Invalid authentication token"),
        })
    }
}
