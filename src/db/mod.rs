//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    /// Favorite join records (keyed by `{user_id}_{activity_id}`)
    pub const FAVORITES: &str = "favorites";
}
