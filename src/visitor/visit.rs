//! Visit records and their validation
//!
//! Every record held by a [`crate::visitor::Visitor`] passed [`VisitRecord::validate`]:
//! it references a POI, carries a real `DD/MM/YYYY` calendar date and either
//! a rating in `1..=10` or no rating at all.

use crate::types::PoiId;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Date format of visit records
pub const VISIT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 10;

static VISIT_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("visit date pattern is valid"));

/// Check that `date` is exactly `DD/MM/YYYY` and names a real calendar day
pub fn is_valid_visit_date(date: &str) -> bool {
    VISIT_DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, VISIT_DATE_FORMAT).is_ok()
}

/// Keep a rating only when it is within `1..=10`
pub fn normalize_rating(rating: Option<i64>) -> Option<u8> {
    rating
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .and_then(|r| u8::try_from(r).ok())
}

/// A validated visit of a visitor to a POI
///
/// Deserialization validates like [`VisitRecord::validate`] and fails on a
/// record it would reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VisitDraft")]
pub struct VisitRecord {
    /// Visited POI
    pub poi_id: PoiId,
    /// Visit date, `DD/MM/YYYY`
    pub date: String,
    /// Optional rating, `1..=10`
    pub rating: Option<u8>,
}

/// An unvalidated visit candidate, as read from configuration or user input
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VisitDraft {
    /// Referenced POI, if any
    pub poi_id: Option<PoiId>,
    /// Date string, if any
    pub date: Option<String>,
    /// Raw rating, if any
    pub rating: Option<i64>,
}

impl VisitDraft {
    /// Create a complete candidate
    pub fn new(poi_id: impl Into<PoiId>, date: impl Into<String>, rating: Option<i64>) -> Self {
        Self { poi_id: Some(poi_id.into()), date: Some(date.into()), rating }
    }
}

impl VisitRecord {
    /// Validate a candidate.
    ///
    /// Returns `None` when the POI reference or the date is missing or
    /// invalid. An out-of-range rating does not reject the record; it is
    /// cleared instead.
    pub fn validate(draft: VisitDraft) -> Option<Self> {
        let poi_id = draft.poi_id?;
        let date = draft.date.filter(|d| is_valid_visit_date(d))?;
        Some(Self { poi_id, date, rating: normalize_rating(draft.rating) })
    }
}

impl TryFrom<VisitDraft> for VisitRecord {
    type Error = String;

    fn try_from(draft: VisitDraft) -> Result<Self, Self::Error> {
        let described = format!("{:?}", draft);
        Self::validate(draft).ok_or_else(|| format!("invalid visit record: {}", described))
    }
}

impl fmt::Display for VisitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rating {
            Some(rating) => write!(f, "{} on {} (rating {})", self.poi_id, self.date, rating),
            None => write!(f, "{} on {} (no rating)", self.poi_id, self.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validation() {
        assert!(is_valid_visit_date("15/09/2024"));
        assert!(is_valid_visit_date("29/02/2024"));
        assert!(!is_valid_visit_date("29/02/2023"));
        assert!(!is_valid_visit_date("32/01/2024"));
        assert!(!is_valid_visit_date("01/13/2024"));
        assert!(!is_valid_visit_date("1/1/2024"));
        assert!(!is_valid_visit_date("01/01/24"));
        assert!(!is_valid_visit_date("2024-09-22"));
        assert!(!is_valid_visit_date(" 15/09/2024"));
        assert!(!is_valid_visit_date(""));
    }

    #[test]
    fn test_rating_normalization() {
        assert_eq!(normalize_rating(Some(1)), Some(1));
        assert_eq!(normalize_rating(Some(10)), Some(10));
        assert_eq!(normalize_rating(Some(0)), None);
        assert_eq!(normalize_rating(Some(11)), None);
        assert_eq!(normalize_rating(Some(-3)), None);
        assert_eq!(normalize_rating(None), None);
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        let record = VisitRecord::validate(VisitDraft::new("P001", "19/09/2024", Some(7))).unwrap();
        assert_eq!(record.poi_id.as_str(), "P001");
        assert_eq!(record.date, "19/09/2024");
        assert_eq!(record.rating, Some(7));
    }

    #[test]
    fn test_validate_clears_bad_rating() {
        let record = VisitRecord::validate(VisitDraft::new("P003", "23/09/2024", Some(15))).unwrap();
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let no_date = VisitDraft { poi_id: Some(PoiId::from("P001")), date: None, rating: Some(7) };
        assert!(VisitRecord::validate(no_date).is_none());

        let no_poi = VisitDraft { poi_id: None, date: Some("19/09/2024".into()), rating: None };
        assert!(VisitRecord::validate(no_poi).is_none());

        assert!(VisitRecord::validate(VisitDraft::new("P002", "2024-09-22", Some(9))).is_none());
    }

    #[test]
    fn test_integer_poi_reference() {
        let record = VisitRecord::validate(VisitDraft::new(42_i64, "01/01/2024", None)).unwrap();
        assert_eq!(record.poi_id, PoiId::from("42"));
    }

    #[test]
    fn test_deserialize_validates() {
        let record: VisitRecord =
            serde_json::from_str(r#"{"poi_id":"P1","date":"01/01/2024","rating":200}"#).unwrap();
        assert_eq!(record.rating, None);

        let bad_date = serde_json::from_str::<VisitRecord>(r#"{"poi_id":"P1","date":"32/13/2024","rating":5}"#);
        assert!(bad_date.is_err());
        assert!(serde_json::from_str::<VisitRecord>(r#"{"date":"01/01/2024"}"#).is_err());
    }

    #[test]
    fn test_display() {
        let rated = VisitRecord::validate(VisitDraft::new("P1", "01/01/2024", Some(8))).unwrap();
        assert_eq!(rated.to_string(), "P1 on 01/01/2024 (rating 8)");
        let unrated = VisitRecord::validate(VisitDraft::new("P1", "01/01/2024", None)).unwrap();
        assert_eq!(unrated.to_string(), "P1 on 01/01/2024 (no rating)");
    }
}
