// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const RECIPES: &str = "recipes";
    pub const WORKOUTS: &str = "workouts";
    /// Daily log aggregates (keyed by `"{user_id}_{date}"`)
    pub const DAILY_LOGS: &str = "daily_logs";
}
