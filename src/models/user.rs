// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// User account stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Account ID (UUID, also used as document ID)
    pub id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address, unique across accounts
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Account role
    #[serde(default)]
    pub role: Role,
    /// Current session token, set at sign-in
    pub token: Option<String>,
    /// Administrative debug flag
    #[serde(default)]
    pub debug_mode_enabled: bool,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}
