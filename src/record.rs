//! Record Model
//!
//! The single entity held by the store, plus the timestamp encoding used
//! for its `created_at` / `updated_at` columns.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RowKvError};

/// One key-value entry with metadata
///
/// JSON shape: `{id, key, value, created_at, updated_at}` with RFC 3339 timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Surrogate primary key, assigned by the engine
    pub id: i64,

    /// Unique across all records (case-sensitive)
    pub key: String,

    pub value: String,

    /// Set once at insertion
    pub created_at: DateTime<Utc>,

    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

/// A key/value pair produced by a synthetic source before insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPair {
    pub key: String,
    pub value: String,
}

// =============================================================================
// Timestamp Encoding
// =============================================================================

/// Encode a timestamp for storage
///
/// Fixed width (`YYYY-MM-DDTHH:MM:SS.ffffffZ`) so that ordering the TEXT
/// column lexicographically is the same as ordering chronologically.
pub fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decode a timestamp written by [`encode_timestamp`]
pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RowKvError::Timestamp(format!("{raw}: {e}")))
}

/// Current time truncated to the stored precision
///
/// Truncating keeps a freshly built `Record` equal to the one read back.
pub fn now() -> DateTime<Utc> {
    truncate_to_micros(Utc::now())
}

/// Next `updated_at` for a record whose previous value was `previous`
///
/// Strictly greater than `previous` even if the clock has not advanced
/// (or has stepped backwards).
pub fn next_update_time(previous: &DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    let floor = *previous + Duration::microseconds(1);
    if now > floor {
        now
    } else {
        floor
    }
}

fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let micros = ts.timestamp_micros();
    DateTime::<Utc>::from_timestamp_micros(micros).unwrap_or(ts)
}
