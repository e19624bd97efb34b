// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity listing model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Listed activity stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Activity ID (UUID, also used as document ID)
    pub id: String,
    /// Activity name/title
    pub name: String,
    /// City where the activity takes place
    pub city: String,
    /// Free-form description
    pub description: String,
    /// Price in whole euros
    pub price: u32,
    /// User who created the activity
    pub owner_id: String,
    /// When the activity was created (RFC 3339)
    pub created_at: String,
}
