use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with fixed millisecond precision, so stamps
/// written by this server also sort lexicographically.
///
/// Stored stamps are never parsed back; history files written by older
/// clients carry other formats (epoch millis, locale time strings).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
