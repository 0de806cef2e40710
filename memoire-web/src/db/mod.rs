//! Database query modules
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so lexicographic
//! `ORDER BY created_at` matches chronological order. Uuids are stored as
//! their hyphenated string form.

pub mod engagement;
pub mod guestbook;
pub mod media;
pub mod playlist;

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Current time in the stored timestamp format
pub(crate) fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("Corrupt timestamp {:?}: {}", s, e)))
}

/// Parse a stored uuid
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| Error::Internal(format!("Corrupt uuid {:?}: {}", s, e)))
}
