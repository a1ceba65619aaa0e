// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Format used by the Endomondo API for `before` cursors and start times.
pub const ENDOMONDO_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Normalize a timestamp to UTC and format it the way the Endomondo API expects
/// (`YYYY-MM-DD HH:MM:SS UTC`).
pub fn format_endomondo_utc<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc)
        .format(ENDOMONDO_TIME_FORMAT)
        .to_string()
}
