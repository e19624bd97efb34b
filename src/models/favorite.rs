// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite join record linking a user to an activity.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Favorite relationship stored in Firestore.
///
/// The document ID is the deterministic pair key `{user_id}_{activity_id}`,
/// so the storage layer enforces uniqueness of the (user, activity) pair:
/// a create-only insert of an existing pair fails with a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Favorite {
    /// User who favorited the activity
    pub user_id: String,
    /// Activity that was favorited
    pub activity_id: String,
    /// Display order within the user's favorites (0-based)
    pub position: u32,
    /// When the favorite was added (RFC 3339)
    pub added_at: String,
}

impl Favorite {
    /// Deterministic document ID for a (user, activity) pair.
    pub fn doc_id(user_id: &str, activity_id: &str) -> String {
        format!("{}_{}", user_id, activity_id)
    }
}
