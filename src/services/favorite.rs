// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites relationship service.
//!
//! A favorite is a join record between a user and an activity, carrying a
//! display position. Each (user, activity) pair is either ABSENT or PRESENT;
//! add/remove/toggle are the only transitions. Pair uniqueness is enforced
//! by the storage layer (create-only insert on the deterministic pair
//! document ID); the existence pre-checks here are advisory fast paths.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{Activity, Favorite, User};
use crate::services::activity::validate_id;
use std::collections::{HashMap, HashSet};

/// Favorites relationship operations.
#[derive(Clone)]
pub struct FavoriteService {
    db: FirestoreDb,
}

impl FavoriteService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Whether the user has favorited the activity. No side effect.
    pub async fn is_favorite(&self, user_id: &str, activity_id: &str) -> Result<bool> {
        validate_id(user_id, "user")?;
        validate_id(activity_id, "activity")?;
        Ok(self.db.get_favorite(user_id, activity_id).await?.is_some())
    }

    /// Favorite an activity.
    ///
    /// Fails with BadRequest on a malformed ID, NotFound if either side of
    /// the pair doesn't exist, and Conflict if the pair is already
    /// favorited. The Conflict pre-check is advisory; the authoritative
    /// rejection comes from the storage layer's insert conflict.
    pub async fn add(&self, user_id: &str, activity_id: &str) -> Result<Favorite> {
        validate_id(user_id, "user")?;
        validate_id(activity_id, "activity")?;

        self.check_pair_exists(user_id, activity_id).await?;

        if self.db.get_favorite(user_id, activity_id).await?.is_some() {
            return Err(AppError::Conflict(
                "Activity is already a favorite".to_string(),
            ));
        }

        let position = self.db.list_favorites_for_user(user_id).await?.len() as u32;

        let favorite = Favorite {
            user_id: user_id.to_string(),
            activity_id: activity_id.to_string(),
            position,
            added_at: chrono::Utc::now().to_rfc3339(),
        };

        self.db.insert_favorite(&favorite).await?;

        tracing::info!(user_id, activity_id, position, "Favorite added");

        Ok(favorite)
    }

    /// Unfavorite an activity.
    ///
    /// Returns whether a favorite was removed. Removing a pair that isn't
    /// favorited is not an error; the call is idempotent.
    pub async fn remove(&self, user_id: &str, activity_id: &str) -> Result<bool> {
        validate_id(user_id, "user")?;
        validate_id(activity_id, "activity")?;

        let removed = self.db.delete_favorite(user_id, activity_id).await?;

        if removed {
            tracing::info!(user_id, activity_id, "Favorite removed");
        }

        Ok(removed)
    }

    /// Flip the favorite state of a pair. Returns the new state.
    ///
    /// Two concurrent toggles on the same pair can never both insert: the
    /// insert is create-only on the pair document, so the loser of the race
    /// sees the storage conflict, at which point the pair is PRESENT and the
    /// losing toggle removes it — the outcome of some sequential order.
    pub async fn toggle(&self, user_id: &str, activity_id: &str) -> Result<bool> {
        validate_id(user_id, "user")?;
        validate_id(activity_id, "activity")?;

        self.check_pair_exists(user_id, activity_id).await?;

        if self.db.get_favorite(user_id, activity_id).await?.is_some() {
            self.db.delete_favorite(user_id, activity_id).await?;
            tracing::info!(user_id, activity_id, "Favorite toggled off");
            return Ok(false);
        }

        let position = self.db.list_favorites_for_user(user_id).await?.len() as u32;

        let favorite = Favorite {
            user_id: user_id.to_string(),
            activity_id: activity_id.to_string(),
            position,
            added_at: chrono::Utc::now().to_rfc3339(),
        };

        match self.db.insert_favorite(&favorite).await {
            Ok(()) => {
                tracing::info!(user_id, activity_id, "Favorite toggled on");
                Ok(true)
            }
            Err(AppError::Conflict(_)) => {
                // Lost an insert race; the pair is now present, so this
                // toggle linearizes after the winner and removes it.
                self.db.delete_favorite(user_id, activity_id).await?;
                tracing::info!(user_id, activity_id, "Favorite toggled off after insert race");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// The user's favorited activities, in display order.
    ///
    /// Favorites whose activity no longer resolves are dropped.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Activity>> {
        validate_id(user_id, "user")?;

        let favorites = self.db.list_favorites_for_user(user_id).await?;
        let ids: Vec<String> = favorites.iter().map(|f| f.activity_id.clone()).collect();

        let mut activities = self.db.get_activities_by_ids(&ids).await?;

        // Activities come back in request order already, but make the
        // display order explicit: positions, not storage order.
        let order: HashMap<&str, usize> = favorites
            .iter()
            .enumerate()
            .map(|(i, f)| (f.activity_id.as_str(), i))
            .collect();
        activities.sort_by_key(|a| order.get(a.id.as_str()).copied().unwrap_or(usize::MAX));

        Ok(activities)
    }

    /// Replace the display order of the user's favorites.
    ///
    /// The payload must be an exact permutation of the current favorite set:
    /// same IDs, same count, no duplicates. Anything else — a foreign ID, a
    /// missing ID, a repeated ID — is rejected with BadRequest and the
    /// stored order is left untouched.
    pub async fn reorder(&self, user_id: &str, activity_ids: &[String]) -> Result<Vec<Activity>> {
        validate_id(user_id, "user")?;
        for id in activity_ids {
            validate_id(id, "activity")?;
        }

        let current = self.db.list_favorites_for_user(user_id).await?;
        let current_ids: Vec<&str> = current.iter().map(|f| f.activity_id.as_str()).collect();

        if !is_permutation(&current_ids, activity_ids) {
            return Err(AppError::BadRequest(
                "Activities don't match current favorites".to_string(),
            ));
        }

        let added_at: HashMap<&str, &str> = current
            .iter()
            .map(|f| (f.activity_id.as_str(), f.added_at.as_str()))
            .collect();

        let reordered: Vec<Favorite> = activity_ids
            .iter()
            .enumerate()
            .map(|(i, id)| Favorite {
                user_id: user_id.to_string(),
                activity_id: id.clone(),
                position: i as u32,
                added_at: added_at
                    .get(id.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
            })
            .collect();

        self.db.set_favorite_positions(&reordered).await?;

        tracing::info!(user_id, count = reordered.len(), "Favorites reordered");

        let activities = self.db.get_activities_by_ids(activity_ids).await?;
        Ok(activities)
    }

    /// The users who favorited an activity.
    pub async fn users_who_favorited(&self, activity_id: &str) -> Result<Vec<User>> {
        validate_id(activity_id, "activity")?;

        let favorites = self.db.list_favorites_for_activity(activity_id).await?;
        let ids: Vec<String> = favorites.iter().map(|f| f.user_id.clone()).collect();
        self.db.get_users_by_ids(&ids).await
    }

    /// NotFound unless both sides of the pair exist.
    async fn check_pair_exists(&self, user_id: &str, activity_id: &str) -> Result<()> {
        if self.db.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if self.db.get_activity(activity_id).await?.is_none() {
            return Err(AppError::NotFound("Activity not found".to_string()));
        }
        Ok(())
    }
}

/// Whether `proposed` is exactly a permutation of `current`: same IDs, same
/// count, no duplicates.
fn is_permutation(current: &[&str], proposed: &[String]) -> bool {
    if proposed.len() != current.len() {
        return false;
    }

    let proposed_set: HashSet<&str> = proposed.iter().map(String::as_str).collect();
    if proposed_set.len() != proposed.len() {
        return false; // duplicate in payload
    }

    current.iter().all(|id| proposed_set.contains(id))
}
