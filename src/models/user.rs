//! Account model for the import rotation.

use serde::{Deserialize, Serialize};

/// Endomondo account whose workouts are imported, stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportUser {
    /// Display name stamped onto imported workouts
    pub username: String,
    /// Login email (also used as document ID)
    pub email: String,
    /// Login password
    pub password: String,
    /// When this account was last imported (RFC3339, UTC)
    pub last_checked: Option<String>,
}

impl ImportUser {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            last_checked: None,
        }
    }
}

/// Pick the account that has waited longest: never-checked accounts first,
/// then the oldest `last_checked`.
pub fn least_recently_checked(users: &[ImportUser]) -> Option<&ImportUser> {
    // None sorts before Some, and RFC3339 UTC strings sort chronologically.
    users.iter().min_by(|a, b| a.last_checked.cmp(&b.last_checked))
}
