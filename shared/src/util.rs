use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 timestamp with second precision, e.g. `2024-01-01T00:00:00Z`
pub fn to_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
