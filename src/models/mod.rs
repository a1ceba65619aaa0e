// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod sport;
pub mod summary;
pub mod user;
pub mod workout;

pub use summary::WorkoutSummary;
pub use user::ImportUser;
pub use workout::{WorkoutListResponse, WorkoutRecord};
