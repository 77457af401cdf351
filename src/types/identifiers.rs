//! Unique identifier types for the POI catalog
//!
//! This module contains the string-backed identifier types for points of interest
//! and visitors, plus the timestamp-based id generator that backs both of them.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Offset of Gulf Standard Time (UTC+4), the zone ids are stamped in
const GST_OFFSET_SECONDS: i32 = 4 * 3600;

/// Prefix used for generated POI identifiers
pub const POI_ID_PREFIX: &str = "poi_";

/// Prefix used for generated visitor identifiers
pub const VISITOR_ID_PREFIX: &str = "u_";

/// Last microsecond timestamp handed out by [`unique_id`]
static LAST_ISSUED_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Next value of the process-wide monotonic microsecond clock.
///
/// Two calls inside the same microsecond get consecutive values, so the
/// clock never repeats and never goes backwards even if wall time does.
fn next_timestamp_micros() -> i64 {
    let now = Utc::now().timestamp_micros();
    let mut issued = now;
    let _ = LAST_ISSUED_MICROS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        issued = now.max(last.saturating_add(1));
        Some(issued)
    });
    issued
}

/// Build an identifier from `prefix` and a high-resolution timestamp.
///
/// The result is unique within a single process run and ids generated later
/// compare greater than ids generated earlier with the same prefix.
pub fn unique_id(prefix: &str) -> String {
    let micros = next_timestamp_micros();
    match (DateTime::from_timestamp_micros(micros), FixedOffset::east_opt(GST_OFFSET_SECONDS)) {
        (Some(utc), Some(offset)) => {
            format!("{}{}", prefix, utc.with_timezone(&offset).format("%Y-%m-%d-%H-%M-%S-%6f"))
        }
        _ => format!("{}{}", prefix, micros),
    }
}

/// Unique identifier for a point of interest
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoiId(String);

impl PoiId {
    /// Generate a fresh POI id
    pub fn generate() -> Self {
        Self(unique_id(POI_ID_PREFIX))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PoiId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PoiId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PoiId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Integer POI references are accepted and kept in their decimal form
impl From<i64> for PoiId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Unique identifier for a visitor
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
    /// Generate a fresh visitor id
    pub fn generate() -> Self {
        Self(unique_id(VISITOR_ID_PREFIX))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VisitorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for VisitorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for VisitorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unique_id_prefix_and_shape() {
        let id = unique_id("poi_");
        assert!(id.starts_with("poi_"));
        // poi_ + YYYY-MM-DD-HH-MM-SS-ffffff
        assert_eq!(id.len(), "poi_".len() + 26);
    }

    #[test]
    fn test_unique_ids_never_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| unique_id("x_")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_ids_sort_in_creation_order() {
        let first = PoiId::generate();
        let second = PoiId::generate();
        assert!(first < second);

        let first = VisitorId::generate();
        let second = VisitorId::generate();
        assert!(first < second);
    }

    #[test]
    fn test_id_conversions() {
        assert_eq!(PoiId::from(42_i64).as_str(), "42");
        assert_eq!(PoiId::from("P001").to_string(), "P001");
        assert_eq!(VisitorId::from("V001".to_string()).as_ref(), "V001");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = PoiId::from("poi_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"poi_1\"");
        let back: PoiId = serde_json::from_str("\"poi_1\"").unwrap();
        assert_eq!(back, id);
    }
}
