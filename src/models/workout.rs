// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record as returned by the Endomondo listing endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::sport::sport_name;

/// One workout, kept verbatim as a field-name to value mapping.
///
/// Accessors are read-only conveniences; they return `None` when a field is
/// absent or holds another type and never change the underlying data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutRecord {
    data: Map<String, Value>,
}

impl WorkoutRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Raw field mapping.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Workout id assigned by Endomondo.
    pub fn id(&self) -> Option<i64> {
        self.data.get("id").and_then(Value::as_i64)
    }

    /// Document key for the store: the numeric id, or a string id as-is.
    pub fn key(&self) -> Option<String> {
        match self.data.get("id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Sport code (see [`crate::models::sport::SPORTS`]).
    pub fn sport(&self) -> Option<i64> {
        self.data.get("sport").and_then(Value::as_i64)
    }

    pub fn sport_name(&self) -> Option<&'static str> {
        self.sport().and_then(sport_name)
    }

    /// Start time as sent by the API (`YYYY-MM-DD HH:MM:SS UTC`).
    pub fn start_time(&self) -> Option<&str> {
        self.data.get("start_time").and_then(Value::as_str)
    }

    pub fn duration_sec(&self) -> Option<f64> {
        self.data.get("duration_sec").and_then(Value::as_f64)
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.data.get("distance_km").and_then(Value::as_f64)
    }

    pub fn speed_kmh_avg(&self) -> Option<f64> {
        self.data.get("speed_kmh_avg").and_then(Value::as_f64)
    }

    pub fn note(&self) -> Option<&str> {
        self.data.get("note").and_then(Value::as_str)
    }

    /// Copy of the record stamped with the importing user's name and id.
    pub fn with_owner(&self, username: &str, user_id: &str) -> Map<String, Value> {
        let mut doc = self.data.clone();
        doc.insert("username".to_string(), Value::from(username));
        doc.insert("user_id".to_string(), Value::from(user_id));
        doc
    }
}

impl From<Map<String, Value>> for WorkoutRecord {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

/// Body of the workout listing endpoint.
#[derive(Debug, Deserialize)]
pub struct WorkoutListResponse {
    pub data: Vec<Map<String, Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> WorkoutRecord {
        match value {
            Value::Object(map) => WorkoutRecord::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_accessors_read_known_fields() {
        let workout = record(json!({
            "id": 215638526,
            "sport": 2,
            "start_time": "2013-05-20 16:05:29 UTC",
            "duration_sec": 3723.0,
            "distance_km": 31.4,
            "speed_kmh_avg": 30.36,
            "note": "Morning loop"
        }));

        assert_eq!(workout.id(), Some(215638526));
        assert_eq!(workout.key().as_deref(), Some("215638526"));
        assert_eq!(workout.sport_name(), Some("Cycling, sport"));
        assert_eq!(workout.start_time(), Some("2013-05-20 16:05:29 UTC"));
        assert_eq!(workout.duration_sec(), Some(3723.0));
        assert_eq!(workout.distance_km(), Some(31.4));
        assert_eq!(workout.note(), Some("Morning loop"));
    }

    #[test]
    fn test_accessors_tolerate_missing_or_mistyped_fields() {
        let workout = record(json!({ "id": "abc", "sport": "running" }));
        assert_eq!(workout.id(), None);
        assert_eq!(workout.key().as_deref(), Some("abc"));
        assert_eq!(workout.sport(), None);
        assert_eq!(workout.distance_km(), None);
        assert_eq!(workout.note(), None);
    }

    #[test]
    fn test_with_owner_leaves_record_untouched() {
        let workout = record(json!({ "id": 7, "sport": 0 }));
        let doc = workout.with_owner("Name1", "name1@example.com");

        assert_eq!(doc["username"], json!("Name1"));
        assert_eq!(doc["user_id"], json!("name1@example.com"));
        assert_eq!(doc["id"], json!(7));
        assert!(workout.get("username").is_none());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let workout = record(json!({ "id": 1, "live": false }));
        let value = serde_json::to_value(&workout).unwrap();
        assert_eq!(value, json!({ "id": 1, "live": false }));
    }
}
