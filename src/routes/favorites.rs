// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites routes for the current user.
//!
//! All routes here require authentication (applied in routes/mod.rs).

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, Favorite};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites).put(reorder_favorites))
        .route(
            "/api/favorites/{activity_id}",
            get(is_favorite).put(add_favorite).delete(remove_favorite),
        )
        .route("/api/favorites/{activity_id}/toggle", post(toggle_favorite))
}

/// The current user's favorite activities, in display order.
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    Ok(Json(
        state.favorite_service.list_for_user(&user.user_id).await?,
    ))
}

/// Current favorite state of a pair.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct IsFavoriteResponse {
    pub favorite: bool,
}

/// Whether the current user has favorited an activity.
async fn is_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
) -> Result<Json<IsFavoriteResponse>> {
    let favorite = state
        .favorite_service
        .is_favorite(&user.user_id, &activity_id)
        .await?;
    Ok(Json(IsFavoriteResponse { favorite }))
}

/// Favorite an activity.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
) -> Result<Json<Favorite>> {
    let favorite = state
        .favorite_service
        .add(&user.user_id, &activity_id)
        .await?;
    Ok(Json(favorite))
}

/// Response for removing a favorite.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RemoveFavoriteResponse {
    /// Whether a favorite was actually removed
    pub removed: bool,
}

/// Unfavorite an activity. Idempotent.
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
) -> Result<Json<RemoveFavoriteResponse>> {
    let removed = state
        .favorite_service
        .remove(&user.user_id, &activity_id)
        .await?;
    Ok(Json(RemoveFavoriteResponse { removed }))
}

/// Response for toggling a favorite.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ToggleFavoriteResponse {
    /// The favorite state after the toggle
    pub favorite: bool,
}

/// Flip the favorite state of an activity.
async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
) -> Result<Json<ToggleFavoriteResponse>> {
    let favorite = state
        .favorite_service
        .toggle(&user.user_id, &activity_id)
        .await?;
    Ok(Json(ToggleFavoriteResponse { favorite }))
}

/// Reorder request body.
#[derive(Deserialize)]
pub struct ReorderFavoritesRequest {
    /// The full favorite set in the desired display order
    pub activity_ids: Vec<String>,
}

/// Replace the display order of the current user's favorites.
///
/// The payload must be an exact permutation of the current favorite set.
async fn reorder_favorites(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ReorderFavoritesRequest>,
) -> Result<Json<Vec<Activity>>> {
    let activities = state
        .favorite_service
        .reorder(&user.user_id, &req.activity_ids)
        .await?;
    Ok(Json(activities))
}
