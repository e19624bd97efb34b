// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity directory service.
//!
//! Listing, filtering and creation of activity records. Activities are
//! never updated or deleted through this surface.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::Activity;

/// Number of activities returned by the latest-activities listing when the
/// caller doesn't ask for a specific count.
const DEFAULT_LATEST_LIMIT: u32 = 3;

/// Fields supplied by the caller when creating an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub name: String,
    pub city: String,
    pub description: String,
    pub price: u32,
}

/// Activity directory operations.
#[derive(Clone)]
pub struct ActivityService {
    db: FirestoreDb,
}

impl ActivityService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// All activities, newest first.
    pub async fn find_all(&self) -> Result<Vec<Activity>> {
        self.db.list_activities().await
    }

    /// The most recent activities, newest first.
    pub async fn find_latest(&self, limit: Option<u32>) -> Result<Vec<Activity>> {
        self.db
            .list_latest_activities(limit.unwrap_or(DEFAULT_LATEST_LIMIT))
            .await
    }

    /// Activities created by a user, newest first.
    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Activity>> {
        self.db.list_activities_for_owner(owner_id).await
    }

    /// Look up a single activity.
    pub async fn find_by_id(&self, id: &str) -> Result<Activity> {
        validate_id(id, "activity")?;
        self.db
            .get_activity(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))
    }

    /// Look up several activities at once.
    ///
    /// IDs that don't resolve are silently dropped; this is the documented
    /// contract, not an error.
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Activity>> {
        self.db.get_activities_by_ids(ids).await
    }

    /// Distinct city names, sorted.
    pub async fn find_cities(&self) -> Result<Vec<String>> {
        self.db.list_cities().await
    }

    /// Activities in a city, optionally narrowed by a case-insensitive
    /// substring of the name and/or an exact price.
    pub async fn search(
        &self,
        city: &str,
        name: Option<&str>,
        price: Option<u32>,
    ) -> Result<Vec<Activity>> {
        let mut activities = self.db.search_activities(city, price).await?;

        if let Some(needle) = name {
            activities.retain(|a| name_contains(&a.name, needle));
        }

        Ok(activities)
    }

    /// Create an activity owned by the caller.
    ///
    /// The owner is the authenticated caller and was validated upstream;
    /// their existence is not re-checked here.
    pub async fn create(&self, owner_id: &str, data: NewActivity) -> Result<Activity> {
        let activity = Activity {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            city: data.city,
            description: data.description,
            price: data.price,
            owner_id: owner_id.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.db.set_activity(&activity).await?;

        tracing::info!(
            activity_id = %activity.id,
            owner_id,
            city = %activity.city,
            "Activity created"
        );

        Ok(activity)
    }
}

/// Validate that an identifier is a well-formed UUID.
pub(crate) fn validate_id(id: &str, what: &str) -> Result<()> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}

/// Case-insensitive substring match on an activity name.
fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}
