//! Store-assigned write stamps.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque stamp assigned by the store on every write.
///
/// `sequence` is drawn from the store revision counter and strictly increases across
/// writes, so stamps compare by sequence alone. `recorded_at` is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimestamp {
    pub sequence: i64,
    pub recorded_at: DateTime<Utc>,
}

impl ServerTimestamp {
    pub fn new(sequence: i64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            sequence,
            recorded_at,
        }
    }
}

impl PartialEq for ServerTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for ServerTimestamp {}

impl PartialOrd for ServerTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServerTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence.cmp(&other.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_orders_by_sequence_only() {
        let later_clock = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let earlier_clock = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let first = ServerTimestamp::new(1, later_clock);
        let second = ServerTimestamp::new(2, earlier_clock);

        assert!(first < second);
    }

    #[test]
    fn test_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(ServerTimestamp::new(3, at)).unwrap();

        assert_eq!(value["sequence"], 3);
        assert!(value["recordedAt"].as_str().unwrap().starts_with("2024-05-01T12:00:00"));
    }
}
