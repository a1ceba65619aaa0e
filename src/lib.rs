// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Endomondo-Archive: copy Endomondo workout history into your own stores
//!
//! This crate provides a client for the Endomondo mobile API and the import
//! jobs that archive each account's workouts in Firestore, with an optional
//! SQLite summary table.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
