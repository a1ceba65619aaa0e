// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod endomondo;
pub mod importer;

pub use endomondo::{Before, EndomondoClient, Identity};
pub use importer::{ImportReport, Importer, PurgeReport};
