// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use endomondo_archive::config::Config;
use endomondo_archive::db::FirestoreDb;
use endomondo_archive::services::{EndomondoClient, Identity};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Config pointing the client at a mock API server.
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        device_hostname: "test-host".to_string(),
        ..Config::default()
    }
}

/// Unauthenticated client pointing at a mock API server.
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> EndomondoClient {
    EndomondoClient::new(server.uri(), Identity::for_host("test-host"))
        .expect("Failed to build client")
}

/// Unique numeric id for test isolation.
#[allow(dead_code)]
pub fn unique_id() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    (SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        % i64::MAX as u128) as i64
}

/// A workout as the listing endpoint returns it.
#[allow(dead_code)]
pub fn workout_json(id: i64, sport: i64) -> Value {
    json!({
        "id": id,
        "sport": sport,
        "start_time": "2013-05-20 16:05:29 UTC",
        "duration_sec": 3723,
        "distance_km": 31.4,
        "speed_kmh_avg": 30.36,
        "live": false
    })
}
