// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optional relational copy of imported workouts (SQLite).
//!
//! One flattened row per workout. Re-importing a workout replaces its row.

use crate::error::AppError;
use crate::models::WorkoutSummary;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Summary table store.
#[derive(Clone)]
pub struct SummaryStore {
    pool: SqlitePool,
}

impl SummaryStore {
    /// Connect and make sure the `workouts` table exists. A missing database
    /// file is created.
    ///
    /// `sqlite::memory:` is supported; the pool is held to one connection so
    /// every query sees the same in-memory database.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid summary store URL: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open summary store: {}", e)))?;

        let store = Self { pool };
        store.migrate().await?;

        tracing::info!("Summary store ready");
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                endo_workout_id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                username TEXT NOT NULL,
                sport TEXT,
                endo_sport_id INTEGER,
                distance_km REAL,
                start_time TEXT,
                duration_sec REAL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create workouts table: {}", e)))?;
        Ok(())
    }

    /// Insert a row, replacing any existing row for the same workout.
    pub async fn replace_summary(&self, row: &WorkoutSummary) -> Result<(), AppError> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO workouts (
                endo_workout_id, user_id, username, sport, endo_sport_id,
                distance_km, start_time, duration_sec, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(row.endo_workout_id)
        .bind(&row.user_id)
        .bind(&row.username)
        .bind(&row.sport)
        .bind(row.endo_sport_id)
        .bind(row.distance_km)
        .bind(&row.start_time)
        .bind(row.duration_sec)
        .bind(&row.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to write workout summary: {}", e)))?;
        Ok(())
    }

    /// Get the row for one workout.
    pub async fn get_summary(&self, endo_workout_id: i64) -> Result<Option<WorkoutSummary>, AppError> {
        sqlx::query_as::<_, WorkoutSummary>(
            r"
            SELECT endo_workout_id, user_id, username, sport, endo_sport_id,
                   distance_km, start_time, duration_sec, created_at
            FROM workouts
            WHERE endo_workout_id = $1
            ",
        )
        .bind(endo_workout_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to read workout summary: {}", e)))
    }

    /// Number of rows in the table.
    pub async fn count(&self) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count workout summaries: {}", e)))
    }

    /// Delete every row. Returns the number deleted.
    pub async fn purge(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM workouts")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to purge workout summaries: {}", e)))?;
        Ok(result.rows_affected())
    }
}
