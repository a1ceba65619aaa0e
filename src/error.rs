// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type shared by the client, the stores and the importer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The auth endpoint did not answer `OK`, or no token could be obtained.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// An authenticated request came back with a non-success status.
    #[error("Request to {url} failed with HTTP {status}")]
    Request { status: u16, url: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Endomondo API error: {0}")]
    EndomondoApi(String),

    /// The document store already holds a document with this id.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status carried by a failed request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error means the document already exists in the store.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, AppError::DuplicateKey(_))
    }

    /// Whether this error came from authentication, either at the auth
    /// endpoint or as a rejected token (401/403) on a later request.
    pub fn is_auth_error(&self) -> bool {
        match self {
            AppError::Authentication(_) => true,
            AppError::Request { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
