// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite summary store tests (in-memory and file-backed databases).

use endomondo_archive::db::SummaryStore;
use endomondo_archive::models::WorkoutSummary;

fn summary(id: i64, username: &str, distance_km: f64) -> WorkoutSummary {
    WorkoutSummary {
        endo_workout_id: id,
        user_id: format!("{username}@example.com"),
        username: username.to_string(),
        sport: Some("Running".to_string()),
        endo_sport_id: Some(0),
        distance_km: Some(distance_km),
        start_time: Some("2013-05-20 16:05:29 UTC".to_string()),
        duration_sec: Some(1800.0),
        created_at: "2024-01-15T10:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn test_replace_summary_roundtrips_row() {
    let store = SummaryStore::connect("sqlite::memory:").await.unwrap();

    let row = summary(1, "Name1", 5.0);
    store.replace_summary(&row).await.unwrap();

    let fetched = store.get_summary(1).await.unwrap();
    assert_eq!(fetched, Some(row));
    assert!(store.get_summary(2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_replace_summary_overwrites_same_workout() {
    let store = SummaryStore::connect("sqlite::memory:").await.unwrap();

    store.replace_summary(&summary(7, "Name1", 5.0)).await.unwrap();
    store.replace_summary(&summary(7, "Name1", 6.5)).await.unwrap();
    store.replace_summary(&summary(8, "Name2", 3.0)).await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    let row = store.get_summary(7).await.unwrap().unwrap();
    assert_eq!(row.distance_km, Some(6.5));
}

#[tokio::test]
async fn test_nullable_columns_roundtrip() {
    let store = SummaryStore::connect("sqlite::memory:").await.unwrap();

    let row = WorkoutSummary {
        sport: None,
        endo_sport_id: None,
        distance_km: None,
        start_time: None,
        duration_sec: None,
        ..summary(9, "Name1", 0.0)
    };
    store.replace_summary(&row).await.unwrap();

    assert_eq!(store.get_summary(9).await.unwrap(), Some(row));
}

#[tokio::test]
async fn test_purge_removes_all_rows() {
    let store = SummaryStore::connect("sqlite::memory:").await.unwrap();

    store.replace_summary(&summary(1, "Name1", 1.0)).await.unwrap();
    store.replace_summary(&summary(2, "Name1", 2.0)).await.unwrap();

    assert_eq!(store.purge().await.unwrap(), 2);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_connect_creates_missing_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summaries.db");
    assert!(!path.exists());
    let url = format!("sqlite://{}", path.display());

    let store = SummaryStore::connect(&url).await.unwrap();
    store.replace_summary(&summary(3, "Name1", 4.2)).await.unwrap();
    assert!(path.exists());
    drop(store);

    // Reopening the same file keeps the rows and the existing table
    let reopened = SummaryStore::connect(&url).await.unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
    assert_eq!(
        reopened.get_summary(3).await.unwrap().unwrap().distance_km,
        Some(4.2)
    );
}
