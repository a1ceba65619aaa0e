// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (accounts in the import rotation)
//! - Workouts (raw Endomondo records, keyed by workout id)
//!
//! Workouts are written with create semantics, so importing the same workout
//! twice is rejected by Firestore and surfaces as [`AppError::DuplicateKey`].

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ImportUser, WorkoutRecord};
use firestore::errors::FirestoreError;
use serde_json::{Map, Value};

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by email.
    pub async fn get_user(&self, email: &str) -> Result<Option<ImportUser>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(email)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every user in the rotation.
    pub async fn list_users(&self) -> Result<Vec<ImportUser>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Add a user; fails with `DuplicateKey` if the email is already registered.
    pub async fn insert_user(&self, user: &ImportUser) -> Result<(), AppError> {
        let result: Result<ImportUser, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.email)
            .object(user)
            .execute()
            .await;

        map_insert_result(result, collections::USERS, &user.email)
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &ImportUser) -> Result<(), AppError> {
        let _: ImportUser = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.email)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a stored workout by its Endomondo id.
    pub async fn get_workout(&self, key: &str) -> Result<Option<WorkoutRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(key)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a workout document under `key`.
    ///
    /// Fails with `DuplicateKey` when a workout with this id already exists;
    /// the existing document is left untouched.
    pub async fn insert_workout(&self, key: &str, doc: &Map<String, Value>) -> Result<(), AppError> {
        let result: Result<Map<String, Value>, FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::WORKOUTS)
            .document_id(key)
            .object(doc)
            .execute()
            .await;

        map_insert_result(result, collections::WORKOUTS, key)
    }

    // ─── Purge ───────────────────────────────────────────────────

    /// Delete every workout document. Returns the number deleted.
    ///
    /// Documents are addressed by their Firestore name, so a body with a
    /// missing or mismatched `id` is still removed.
    pub async fn purge_workouts(&self) -> Result<usize, AppError> {
        let docs: Vec<firestore::FirestoreDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let keys: Vec<String> = docs
            .iter()
            .filter_map(|doc| document_id(&doc.name))
            .map(str::to_string)
            .collect();

        self.batch_delete(&keys, collections::WORKOUTS, |key| key.clone())
            .await?;

        tracing::info!(count = keys.len(), "Purged workouts");
        Ok(keys.len())
    }

    /// Delete every user document. Returns the number deleted.
    pub async fn purge_users(&self) -> Result<usize, AppError> {
        let users = self.list_users().await?;

        self.batch_delete(&users, collections::USERS, |user: &ImportUser| {
            user.email.clone()
        })
        .await?;

        tracing::info!(count = users.len(), "Purged users");
        Ok(users.len())
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }
}

/// Translate an insert result, keeping Firestore's "already exists" conflict
/// distinct from every other failure.
fn map_insert_result<T>(
    result: Result<T, FirestoreError>,
    collection: &str,
    key: &str,
) -> Result<(), AppError> {
    match result {
        Ok(_) => Ok(()),
        Err(FirestoreError::DataConflictError(_)) => {
            Err(AppError::DuplicateKey(format!("{}/{}", collection, key)))
        }
        Err(e) => Err(AppError::Database(e.to_string())),
    }
}

/// Last path segment of a full document name
/// (`projects/../documents/<collection>/<id>`).
fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}
