// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account directory service.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Role, User};
use crate::services::activity::validate_id;

/// Fields supplied at sign-up.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// Account directory operations.
#[derive(Clone)]
pub struct UserService {
    db: FirestoreDb,
}

impl UserService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Look up an account by ID.
    pub async fn get_by_id(&self, id: &str) -> Result<User> {
        validate_id(id, "user")?;
        self.db
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Look up an account by email.
    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.db
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Find an account by email without failing on absence.
    ///
    /// Used for uniqueness checks at sign-up.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.db.find_user_by_email(email).await
    }

    /// Create an account with a bcrypt-hashed password.
    ///
    /// An already-registered email is rejected with Unauthorized rather than
    /// a validation error, so the response doesn't reveal which addresses
    /// have accounts.
    pub async fn create(&self, data: NewUser) -> Result<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            tracing::info!("Sign-up rejected for already-registered email");
            return Err(AppError::Unauthorized);
        }

        let password_hash = bcrypt::hash(&data.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_hash,
            role: data.role.unwrap_or_default(),
            token: None,
            debug_mode_enabled: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.db.upsert_user(&user).await?;

        tracing::info!(user_id = %user.id, "Account created");

        Ok(user)
    }

    /// Check an email/password pair and return the matching account.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check failed: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Store the current session token on the account.
    pub async fn update_token(&self, id: &str, token: &str) -> Result<User> {
        let mut user = self.get_by_id(id).await?;
        user.token = Some(token.to_string());
        self.db.upsert_user(&user).await?;
        Ok(user)
    }

    /// Number of registered accounts.
    pub async fn count(&self) -> Result<usize> {
        self.db.count_users().await
    }

    /// Toggle the administrative debug flag on an account.
    pub async fn set_debug_mode(&self, id: &str, enabled: bool) -> Result<User> {
        let mut user = self.get_by_id(id).await?;
        user.debug_mode_enabled = enabled;
        self.db.upsert_user(&user).await?;
        Ok(user)
    }
}
