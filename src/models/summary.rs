// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Flattened workout row for the relational summary store.

use serde::{Deserialize, Serialize};

use crate::models::{ImportUser, WorkoutRecord};

/// One row of the `workouts` summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSummary {
    /// Endomondo workout ID (unique)
    pub endo_workout_id: i64,
    /// Importing account (its email)
    pub user_id: String,
    pub username: String,
    /// Sport name, if the code is known
    pub sport: Option<String>,
    /// Raw Endomondo sport code
    pub endo_sport_id: Option<i64>,
    pub distance_km: Option<f64>,
    /// Start time as sent by the API
    pub start_time: Option<String>,
    pub duration_sec: Option<f64>,
    /// When this row was written (RFC3339)
    pub created_at: String,
}

impl WorkoutSummary {
    /// Build a summary row; `None` when the record has no numeric id.
    pub fn from_record(record: &WorkoutRecord, user: &ImportUser, now: &str) -> Option<Self> {
        Some(Self {
            endo_workout_id: record.id()?,
            user_id: user.email.clone(),
            username: user.username.clone(),
            sport: record.sport_name().map(str::to_string),
            endo_sport_id: record.sport(),
            distance_km: record.distance_km(),
            start_time: record.start_time().map(str::to_string),
            duration_sec: record.duration_sec(),
            created_at: now.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record_flattens_known_fields() {
        let record: WorkoutRecord = serde_json::from_value(json!({
            "id": 42,
            "sport": 0,
            "distance_km": 10.2,
            "start_time": "2013-05-20 16:05:29 UTC",
            "duration_sec": 3000
        }))
        .unwrap();
        let user = ImportUser::new("Name1", "name1@example.com", "pw");

        let row = WorkoutSummary::from_record(&record, &user, "2024-01-01T00:00:00Z").unwrap();
        assert_eq!(row.endo_workout_id, 42);
        assert_eq!(row.user_id, "name1@example.com");
        assert_eq!(row.sport.as_deref(), Some("Running"));
        assert_eq!(row.endo_sport_id, Some(0));
        assert_eq!(row.duration_sec, Some(3000.0));
    }

    #[test]
    fn test_from_record_requires_numeric_id() {
        let record: WorkoutRecord = serde_json::from_value(json!({ "sport": 0 })).unwrap();
        let user = ImportUser::new("Name1", "name1@example.com", "pw");
        assert!(WorkoutSummary::from_record(&record, &user, "now").is_none());
    }
}
