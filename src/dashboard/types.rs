//! Core data types for the dashboard pipeline
//!
//! - `Reading`: one simulated sensor measurement
//! - `Snapshot`: an immutable copy of the history at a given version

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed presentation format of reading timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single sensor reading
///
/// Immutable once created. The timestamp is kept at whole-second precision
/// so that its formatted and parsed forms always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    value: f64,
    #[serde(with = "timestamp_format")]
    timestamp: NaiveDateTime,
}

impl Reading {
    /// Create a reading, truncating the timestamp to whole seconds
    pub fn new(value: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            value,
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        }
    }

    /// Create a reading from a `YYYY-MM-DD HH:MM:SS` timestamp string
    pub fn parse(value: f64, timestamp: &str) -> Result<Self, chrono::ParseError> {
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)?;
        Ok(Self::new(value, timestamp))
    }

    /// The measured value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Wall-clock time the reading was taken
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp in the fixed `YYYY-MM-DD HH:MM:SS` format
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Time-of-day part only, used for compact axis labels
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.value, self.formatted_timestamp())
    }
}

/// Immutable, cheaply cloneable copy of the history contents
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    readings: Arc<[Reading]>,
    version: u64,
}

impl Snapshot {
    pub fn new(readings: Arc<[Reading]>, version: u64) -> Self {
        Self { readings, version }
    }

    /// An empty snapshot at version 0
    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()), 0)
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_reading_truncates_subseconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_milli_opt(12, 30, 45, 999)
            .unwrap();
        let reading = Reading::new(-17.2, ts);

        assert_eq!(reading.formatted_timestamp(), "2024-03-01 12:30:45");
        assert_eq!(reading.timestamp().nanosecond(), 0);
    }

    #[test]
    fn test_reading_parse() {
        let reading = Reading::parse(-16.8, "2024-03-01 08:00:01").unwrap();
        assert_eq!(reading.value(), -16.8);
        assert_eq!(reading.formatted_time(), "08:00:01");

        assert!(Reading::parse(-16.8, "01/03/2024 08:00").is_err());
    }

    #[test]
    fn test_reading_json_uses_fixed_format() {
        let reading = Reading::parse(-17.9, "2024-03-01 08:00:02").unwrap();
        let json = serde_json::to_string(&reading).unwrap();
        assert_eq!(json, r#"{"value":-17.9,"timestamp":"2024-03-01 08:00:02"}"#);

        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.version(), 0);
    }
}
