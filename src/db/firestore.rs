// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (account storage)
//! - Activities (listed offerings)
//! - Favorites (join collection linking users and activities)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, Favorite, User};
use futures_util::{stream, StreamExt};
use std::collections::BTreeSet;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by email. Returns None if no account uses the address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.for_all([q.field("email").eq(email.clone())]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count user accounts.
    pub async fn count_users(&self) -> Result<usize, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.len())
    }

    /// Fetch users by ID, dropping IDs that don't resolve.
    ///
    /// Uses concurrent reads with a limit to avoid overloading Firestore.
    pub async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AppError> {
        let client = self.get_client()?;

        let found = stream::iter(ids.to_vec())
            .map(|id| async move {
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::USERS)
                    .obj::<User>()
                    .one(&id)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<User>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<User>>, AppError>>()?;

        Ok(found.into_iter().flatten().collect())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Get an activity by ID.
    pub async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(activity_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all activities, newest first.
    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the most recent activities, newest first.
    pub async fn list_latest_activities(&self, limit: u32) -> Result<Vec<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List activities created by a user, newest first.
    pub async fn list_activities_for_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<Activity>, AppError> {
        let owner_id = owner_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.for_all([q.field("owner_id").eq(owner_id.clone())]))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch activities by ID, dropping IDs that don't resolve.
    ///
    /// Missing IDs are silently skipped; the result preserves input order.
    /// Uses concurrent reads with a limit to avoid overloading Firestore.
    pub async fn get_activities_by_ids(&self, ids: &[String]) -> Result<Vec<Activity>, AppError> {
        let client = self.get_client()?;

        let found = stream::iter(ids.to_vec())
            .map(|id| async move {
                client
                    .fluent()
                    .select()
                    .by_id_in(collections::ACTIVITIES)
                    .obj::<Activity>()
                    .one(&id)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<Activity>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<Activity>>, AppError>>()?;

        Ok(found.into_iter().flatten().collect())
    }

    /// List distinct city names, sorted.
    ///
    /// Firestore has no distinct-value query, so this scans the collection
    /// and dedups in memory.
    pub async fn list_cities(&self) -> Result<Vec<String>, AppError> {
        let activities: Vec<Activity> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let cities: BTreeSet<String> = activities.into_iter().map(|a| a.city).collect();
        Ok(cities.into_iter().collect())
    }

    /// Query activities in a city, optionally at an exact price.
    ///
    /// Name substring matching is applied by the service layer; Firestore
    /// has no case-insensitive text operator.
    pub async fn search_activities(
        &self,
        city: &str,
        price: Option<u32>,
    ) -> Result<Vec<Activity>, AppError> {
        let city = city.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES);

        let query = if let Some(price) = price {
            query.filter(move |q| {
                q.for_all([
                    q.field("city").eq(city.clone()),
                    q.field("price").eq(price),
                ])
            })
        } else {
            query.filter(move |q| q.for_all([q.field("city").eq(city.clone())]))
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store an activity.
    pub async fn set_activity(&self, activity: &Activity) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&activity.id)
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Favorite Operations ─────────────────────────────────────

    /// Get the favorite record for a (user, activity) pair.
    pub async fn get_favorite(
        &self,
        user_id: &str,
        activity_id: &str,
    ) -> Result<Option<Favorite>, AppError> {
        let doc_id = Favorite::doc_id(user_id, activity_id);
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FAVORITES)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a favorite record.
    ///
    /// Uses create-only semantics on the deterministic pair document ID, so
    /// the uniqueness of the (user, activity) pair is enforced by Firestore
    /// itself: inserting an existing pair fails and is surfaced as Conflict.
    pub async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), AppError> {
        let doc_id = Favorite::doc_id(&favorite.user_id, &favorite.activity_id);
        let _: () = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::FAVORITES)
            .document_id(&doc_id)
            .object(favorite)
            .execute()
            .await
            .map_err(|e| match e {
                firestore::errors::FirestoreError::DataConflictError(_) => {
                    AppError::Conflict("Activity is already a favorite".to_string())
                }
                other => AppError::Database(other.to_string()),
            })?;
        Ok(())
    }

    /// Delete the favorite record for a (user, activity) pair.
    ///
    /// Returns whether a record existed. Deleting a missing pair is a no-op.
    pub async fn delete_favorite(
        &self,
        user_id: &str,
        activity_id: &str,
    ) -> Result<bool, AppError> {
        let doc_id = Favorite::doc_id(user_id, activity_id);

        let existing: Option<Favorite> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FAVORITES)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FAVORITES)
            .document_id(&doc_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }

    /// List a user's favorites in display order.
    pub async fn list_favorites_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Favorite>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITES)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([("position", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the favorite records referencing an activity.
    pub async fn list_favorites_for_activity(
        &self,
        activity_id: &str,
    ) -> Result<Vec<Favorite>, AppError> {
        let activity_id = activity_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITES)
            .filter(move |q| q.for_all([q.field("activity_id").eq(activity_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Rewrite the position fields of a user's favorites atomically.
    ///
    /// All writes go through a single Firestore transaction so a reorder is
    /// never observed half-applied.
    pub async fn set_favorite_positions(&self, favorites: &[Favorite]) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        for favorite in favorites {
            let doc_id = Favorite::doc_id(&favorite.user_id, &favorite.activity_id);
            client
                .fluent()
                .update()
                .in_col(collections::FAVORITES)
                .document_id(&doc_id)
                .object(favorite)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add reorder write to transaction: {}", e))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(())
    }
}
