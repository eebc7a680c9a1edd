//! Row models for the `help_chats` table and the timestamp encoding they share.

mod message_record;
mod summary_record;

pub use message_record::MessageRecord;
pub use summary_record::SummaryRecord;

use chrono::{DateTime, Timelike, Utc};

use crate::error::StorageError;

/// Fixed-width RFC 3339 form so `created_at` sorts correctly as TEXT.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::Decode(format!("invalid timestamp '{}': {}", raw, e)))
}

/// Drops sub-microsecond precision, matching what [`format_timestamp`] keeps.
pub(crate) fn truncate_to_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = ts.nanosecond();
    ts.with_nanosecond(nanos - nanos % 1_000).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_text_round_trip_keeps_micros() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let truncated = truncate_to_micros(ts);

        let text = format_timestamp(&truncated);
        assert_eq!(text, "2026-10-19T08:30:00.123456Z");
        assert_eq!(parse_timestamp(&text).unwrap(), truncated);
    }

    #[test]
    fn test_timestamp_text_sorts_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(5);
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(StorageError::Decode(_))
        ));
    }
}
