// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout import jobs.
//!
//! Handles the core workflow:
//! 1. Pick an account (next in rotation, or all of them)
//! 2. Log in with a fresh client for that account
//! 3. Fetch the workout list
//! 4. Store each workout in Firestore, skipping ones already there
//! 5. Replace the summary row in SQLite, if configured

use crate::config::Config;
use crate::db::{FirestoreDb, SummaryStore};
use crate::error::{AppError, Result};
use crate::models::user::least_recently_checked;
use crate::models::{ImportUser, WorkoutSummary};
use crate::services::endomondo::{Before, EndomondoClient};
use crate::time_utils::format_utc_rfc3339;

/// Outcome of importing one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Workouts returned by the API
    pub fetched: usize,
    /// Workouts newly stored
    pub inserted: usize,
    /// Workouts already in the store
    pub duplicates: usize,
    /// Workouts without an id, not stored
    pub skipped: usize,
}

/// Copies workouts from Endomondo into the stores.
pub struct Importer {
    config: Config,
    db: FirestoreDb,
    summaries: Option<SummaryStore>,
}

impl Importer {
    pub fn new(config: Config, db: FirestoreDb, summaries: Option<SummaryStore>) -> Self {
        Self {
            config,
            db,
            summaries,
        }
    }

    /// Build an unauthenticated client for one account.
    ///
    /// Each account gets its own client so tokens never cross accounts.
    pub fn client_for(&self, user: &ImportUser) -> Result<EndomondoClient> {
        let config = Config {
            auth_token: None,
            email: Some(user.email.clone()),
            password: Some(user.password.clone()),
            ..self.config.clone()
        };
        EndomondoClient::from_config(&config)
    }

    /// Register an account; an existing email comes back as `DuplicateKey`.
    pub async fn add_user(&self, user: &ImportUser) -> Result<()> {
        self.db.insert_user(user).await?;
        tracing::info!(username = %user.username, "User added to import rotation");
        Ok(())
    }

    /// Import one account's workouts with the given client.
    ///
    /// A workout already in the store is counted as a duplicate. Any other
    /// store error aborts the import.
    pub async fn import_user(
        &self,
        client: &mut EndomondoClient,
        user: &ImportUser,
        max_results: u32,
        before: Option<Before>,
    ) -> Result<ImportReport> {
        tracing::info!(username = %user.username, max_results, "Importing workouts");

        let workouts = client.list_workouts(max_results, before).await?;
        let now = format_utc_rfc3339(chrono::Utc::now());

        let mut report = ImportReport {
            fetched: workouts.len(),
            ..ImportReport::default()
        };

        for workout in &workouts {
            let Some(key) = workout.key() else {
                tracing::warn!(username = %user.username, "Workout without id, skipping");
                report.skipped += 1;
                continue;
            };

            let doc = workout.with_owner(&user.username, &user.email);
            match self.db.insert_workout(&key, &doc).await {
                Ok(()) => report.inserted += 1,
                Err(e) if e.is_duplicate_key() => {
                    tracing::info!(workout_id = %key, "Workout already stored, not inserted");
                    report.duplicates += 1;
                }
                Err(e) => return Err(e),
            }

            if let Some(store) = &self.summaries {
                match WorkoutSummary::from_record(workout, user, &now) {
                    Some(row) => store.replace_summary(&row).await?,
                    None => tracing::debug!(workout_id = %key, "No numeric id, summary row skipped"),
                }
            }
        }

        tracing::info!(
            username = %user.username,
            fetched = report.fetched,
            inserted = report.inserted,
            duplicates = report.duplicates,
            skipped = report.skipped,
            "Import finished"
        );

        Ok(report)
    }

    /// Import the account that has waited longest since its last check.
    ///
    /// `last_checked` is stamped before fetching so a failing account does
    /// not block the rotation. Returns `None` if there are no accounts.
    pub async fn import_next_user(
        &self,
        max_results: u32,
        before: Option<Before>,
    ) -> Result<Option<(ImportUser, ImportReport)>> {
        let users = self.db.list_users().await?;
        let Some(next) = least_recently_checked(&users) else {
            tracing::warn!("No users registered for import");
            return Ok(None);
        };

        let mut user = next.clone();
        user.last_checked = Some(format_utc_rfc3339(chrono::Utc::now()));
        self.db.upsert_user(&user).await?;

        let mut client = self.client_for(&user)?;
        let report = self.import_user(&mut client, &user, max_results, before).await?;
        Ok(Some((user, report)))
    }

    /// Import every account in turn. A failing account is logged and skipped.
    pub async fn import_all_users(
        &self,
        max_results: u32,
        before: Option<Before>,
    ) -> Result<Vec<(ImportUser, std::result::Result<ImportReport, AppError>)>> {
        let users = self.db.list_users().await?;
        let mut results = Vec::with_capacity(users.len());

        for mut user in users {
            user.last_checked = Some(format_utc_rfc3339(chrono::Utc::now()));
            if let Err(e) = self.db.upsert_user(&user).await {
                tracing::warn!(error = %e, username = %user.username, "Failed to stamp last_checked, continuing anyway");
            }

            let outcome = match self.client_for(&user) {
                Ok(mut client) => {
                    self.import_user(&mut client, &user, max_results, before.clone())
                        .await
                }
                Err(e) => Err(e),
            };

            if let Err(e) = &outcome {
                tracing::error!(error = %e, username = %user.username, "Import failed for user");
            }
            results.push((user, outcome));
        }

        Ok(results)
    }

    /// Delete all stored workouts (and summary rows); optionally all users too.
    pub async fn purge(&self, include_users: bool) -> Result<PurgeReport> {
        let mut report = PurgeReport {
            workouts: self.db.purge_workouts().await?,
            ..PurgeReport::default()
        };

        if let Some(store) = &self.summaries {
            report.summaries = store.purge().await?;
        }
        if include_users {
            report.users = self.db.purge_users().await?;
        }
        Ok(report)
    }
}

/// Counts of deleted documents and rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub workouts: usize,
    pub users: usize,
    pub summaries: u64,
}
