// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity directory routes.
//!
//! Browsing and searching are public; creating an activity and listing
//! one's own require authentication.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Activity;
use crate::routes::auth::UserResponse;
use crate::services::NewActivity;
use crate::AppState;

/// Routes that don't require authentication.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities))
        .route("/api/activities/latest", get(latest_activities))
        .route("/api/activities/cities", get(list_cities))
        .route("/api/activities/search", get(search_activities))
        .route("/api/activities/{id}", get(get_activity))
}

/// Routes requiring authentication (auth middleware applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route(
            "/api/me/activities",
            get(my_activities).post(create_activity),
        )
}

// ─── Public Directory ────────────────────────────────────────

/// All activities, newest first.
async fn list_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.activity_service.find_all().await?))
}

#[derive(Deserialize)]
struct LatestQuery {
    /// How many activities to return (defaults to 3)
    limit: Option<u32>,
}

/// The most recent activities.
async fn latest_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LatestQuery>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(
        state.activity_service.find_latest(params.limit).await?,
    ))
}

/// Distinct city names.
async fn list_cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.activity_service.find_cities().await?))
}

#[derive(Deserialize)]
struct SearchQuery {
    /// City to search in (exact match)
    city: String,
    /// Case-insensitive substring of the activity name
    activity: Option<String>,
    /// Exact price
    price: Option<u32>,
}

/// Activities in a city, optionally narrowed by name and price.
async fn search_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state
        .activity_service
        .search(&params.city, params.activity.as_deref(), params.price)
        .await?;
    Ok(Json(activities))
}

/// Look up a single activity.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Activity>> {
    Ok(Json(state.activity_service.find_by_id(&id).await?))
}

// ─── Authenticated ───────────────────────────────────────────

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.user_service.get_by_id(&user.user_id).await?;
    Ok(Json(profile.into()))
}

/// Activities created by the current user, newest first.
async fn my_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(
        state.activity_service.find_by_owner(&user.user_id).await?,
    ))
}

/// Activity creation request body.
#[derive(Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub description: String,
    pub price: u32,
}

/// Create an activity owned by the current user.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Json<Activity>> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let activity = state
        .activity_service
        .create(
            &user.user_id,
            NewActivity {
                name: req.name,
                city: req.city,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

    Ok(Json(activity))
}
