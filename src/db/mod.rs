//! Database layer (Firestore documents, optional SQLite summaries).

pub mod firestore;
pub mod sqlite;

pub use firestore::FirestoreDb;
pub use sqlite::SummaryStore;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
}
