// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-up and sign-in routes issuing JWT session tokens.

use axum::{
    extract::State,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::{Role, User};
use crate::services::NewUser;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/signout", get(signout))
}

/// Sign-up request body.
#[derive(Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Sign-in request body.
#[derive(Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// User profile as exposed to clients.
///
/// Never includes the password hash or the stored session token.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub debug_mode_enabled: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            debug_mode_enabled: user.debug_mode_enabled,
            created_at: user.created_at,
        }
    }
}

/// Session issued at sign-up/sign-in.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Create an account and open a session.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state
        .user_service
        .create(NewUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            // Roles are never client-assigned
            role: None,
        })
        .await?;

    open_session(&state, user).await
}

/// Check credentials and open a session.
async fn signin(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthResponse>> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    open_session(&state, user).await
}

/// Issue a JWT, persist it on the account, and return the session.
async fn open_session(state: &Arc<AppState>, user: User) -> Result<Json<AuthResponse>> {
    let jwt = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let user = state.user_service.update_token(&user.id, &jwt).await?;

    tracing::info!(user_id = %user.id, "Session opened");

    Ok(Json(AuthResponse {
        token: jwt,
        user: user.into(),
    }))
}

/// Sign out.
async fn signout() -> Redirect {
    // The actual sign-out happens on the client side by discarding the token
    // This endpoint just redirects back
    Redirect::temporary("/")
}
