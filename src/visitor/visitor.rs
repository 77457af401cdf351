//! Visitor entity
//!
//! A visitor's identity is fixed at construction. The visit history is an
//! ordered list of validated [`VisitRecord`]s that only changes through
//! [`Visitor::add_visit`] and [`Visitor::delete_visit`].

use crate::types::{PoiId, VisitorId};
use crate::visitor::visit::{VisitDraft, VisitRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// A person with a nationality and a history of visits
///
/// Deserialized visitors go through [`Visitor::new`], so invalid visits are
/// dropped the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VisitorData")]
pub struct Visitor {
    id: VisitorId,
    name: String,
    nationality: String,
    visits: Vec<VisitRecord>,
}

/// Serialized shape of a visitor, before its visits are validated
#[derive(Debug, Deserialize)]
struct VisitorData {
    id: VisitorId,
    name: String,
    nationality: String,
    #[serde(default)]
    visits: Vec<VisitDraft>,
}

impl From<VisitorData> for Visitor {
    fn from(data: VisitorData) -> Self {
        Self::new(data.id, data.name, data.nationality, data.visits)
    }
}

impl Visitor {
    /// Create a visitor, keeping only the candidate visits that validate
    pub fn new(
        id: VisitorId,
        name: impl Into<String>,
        nationality: impl Into<String>,
        visits: Vec<VisitDraft>,
    ) -> Self {
        let candidates = visits.len();
        let visits: Vec<VisitRecord> = visits.into_iter().filter_map(VisitRecord::validate).collect();

        if visits.len() < candidates {
            debug!(
                visitor_id = %id,
                dropped = candidates - visits.len(),
                "Dropped invalid visits while creating visitor"
            );
        }

        Self { id, name: name.into(), nationality: nationality.into(), visits }
    }

    /// Unique identifier of the visitor
    pub fn id(&self) -> &VisitorId {
        &self.id
    }

    /// Full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nationality
    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    /// Copy of the visit history
    pub fn visits(&self) -> Vec<VisitRecord> {
        self.visits.clone()
    }

    /// Total number of visits, repeated visits included
    pub fn num_visits(&self) -> usize {
        self.visits.len()
    }

    /// POI ids of all visits, with duplicates
    pub fn visited_poi_ids(&self) -> Vec<PoiId> {
        self.visits.iter().map(|v| v.poi_id.clone()).collect()
    }

    /// Distinct visited POI ids in first-visit order
    pub fn unique_visited_poi_ids(&self) -> Vec<PoiId> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for visit in &self.visits {
            if seen.insert(&visit.poi_id) {
                unique.push(visit.poi_id.clone());
            }
        }
        unique
    }

    /// Check whether the visitor has been to a POI at least once
    pub fn has_visited_poi(&self, poi_id: &str) -> bool {
        self.visits.iter().any(|v| v.poi_id.as_str() == poi_id)
    }

    /// All visits to one POI
    pub fn visits_to_poi(&self, poi_id: &str) -> Vec<VisitRecord> {
        self.visits.iter().filter(|v| v.poi_id.as_str() == poi_id).cloned().collect()
    }

    /// Mean of the ratings present, `None` if no visit is rated
    pub fn average_rating(&self) -> Option<f64> {
        let ratings: Vec<f64> = self.visits.iter().filter_map(|v| v.rating).map(f64::from).collect();
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }

    /// Record a visit.
    ///
    /// Returns `false` without touching the history when the date is not a
    /// valid `DD/MM/YYYY` day. An out-of-range rating is stored as no rating.
    pub fn add_visit(&mut self, poi_id: impl Into<PoiId>, date: impl Into<String>, rating: Option<i64>) -> bool {
        match VisitRecord::validate(VisitDraft::new(poi_id, date, rating)) {
            Some(record) => {
                self.visits.push(record);
                true
            }
            None => {
                warn!("Invalid visit data - please check poi_id, date format (dd/mm/yyyy), and rating (1-10)");
                false
            }
        }
    }

    /// Remove the first visit to `poi_id`, returning whether one existed
    pub fn delete_visit(&mut self, poi_id: &str) -> bool {
        match self.visits.iter().position(|v| v.poi_id.as_str() == poi_id) {
            Some(index) => {
                self.visits.remove(index);
                true
            }
            None => {
                warn!("Trying to delete non-existent POI id: {}", poi_id);
                false
            }
        }
    }
}

impl fmt::Display for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Visitor(id='{}', name='{}', nationality='{}', visits=[",
            self.id, self.name, self.nationality
        )?;
        for (i, visit) in self.visits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", visit)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Visitor {
        Visitor::new(
            VisitorId::from("V001"),
            "Alice Johnson",
            "American",
            vec![
                VisitDraft::new("P001", "19/09/2024", None),
                VisitDraft { poi_id: Some("P003".into()), date: None, rating: Some(4) },
                VisitDraft::new("P004", "15/08/2024", Some(7)),
            ],
        )
    }

    #[test]
    fn test_construction_filters_invalid_visits() {
        let visitor = alice();
        assert_eq!(visitor.id().as_str(), "V001");
        assert_eq!(visitor.name(), "Alice Johnson");
        assert_eq!(visitor.nationality(), "American");
        assert_eq!(visitor.num_visits(), 2);
        assert_eq!(visitor.visited_poi_ids(), vec![PoiId::from("P001"), PoiId::from("P004")]);
    }

    #[test]
    fn test_visits_copy_is_detached() {
        let visitor = alice();
        let mut copy = visitor.visits();
        copy.clear();
        assert_eq!(visitor.num_visits(), 2);
    }

    #[test]
    fn test_add_visit() {
        let mut visitor = Visitor::new(VisitorId::from("V003"), "Carol Kim", "Korean", Vec::new());

        assert!(visitor.add_visit("P001", "22/09/2024", Some(8)));
        assert!(!visitor.add_visit("P002", "2024-09-22", Some(9)));
        assert!(visitor.add_visit("P003", "23/09/2024", Some(15)));

        assert_eq!(visitor.num_visits(), 2);
        assert_eq!(visitor.visits()[1].rating, None);
    }

    #[test]
    fn test_delete_visit_removes_first_match_only() {
        let mut visitor = alice();
        visitor.add_visit("P001", "25/09/2024", Some(9));
        assert_eq!(visitor.visits_to_poi("P001").len(), 2);

        assert!(visitor.delete_visit("P001"));
        let remaining = visitor.visits_to_poi("P001");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].date, "25/09/2024");

        assert!(!visitor.delete_visit("P999"));
        assert_eq!(visitor.num_visits(), 2);
    }

    #[test]
    fn test_unique_ids_keep_first_seen_order() {
        let mut visitor = alice();
        visitor.add_visit("P001", "25/09/2024", None);
        visitor.add_visit("P006", "26/09/2024", None);

        assert_eq!(visitor.visited_poi_ids().len(), 4);
        assert_eq!(
            visitor.unique_visited_poi_ids(),
            vec![PoiId::from("P001"), PoiId::from("P004"), PoiId::from("P006")]
        );
        assert!(visitor.has_visited_poi("P006"));
        assert!(!visitor.has_visited_poi("P999"));
    }

    #[test]
    fn test_average_rating() {
        let mut visitor = alice();
        assert_eq!(visitor.average_rating(), Some(7.0));

        visitor.add_visit("P006", "26/09/2024", Some(6));
        assert_eq!(visitor.average_rating(), Some(6.5));

        let unrated = Visitor::new(
            VisitorId::from("V002"),
            "Bob Garcia",
            "Spanish",
            vec![VisitDraft::new("P002", "19/09/2024", None)],
        );
        assert_eq!(unrated.average_rating(), None);
    }

    #[test]
    fn test_structural_equality() {
        let copy = Visitor::new(
            VisitorId::from("V001"),
            "Alice Johnson",
            "American",
            vec![
                VisitDraft::new("P001", "19/09/2024", None),
                VisitDraft::new("P004", "15/08/2024", Some(7)),
            ],
        );
        assert_eq!(alice(), copy);

        let mut changed = copy.clone();
        changed.add_visit("P005", "20/09/2024", Some(9));
        assert_ne!(alice(), changed);
    }

    #[test]
    fn test_deserialize_drops_invalid_visits() {
        let json = r#"{"id":"u_1","name":"Mallory","nationality":"X","visits":[
            {"poi_id":"p","date":"32/13/2024","rating":200},
            {"poi_id":"q","date":"01/02/2024","rating":200},
            {"poi_id":"r","date":"02/02/2024","rating":6}
        ]}"#;
        let visitor: Visitor = serde_json::from_str(json).unwrap();

        assert_eq!(visitor.num_visits(), 2);
        assert!(!visitor.has_visited_poi("p"));
        assert_eq!(visitor.visits()[0].rating, None);
        assert_eq!(visitor.visits()[1].rating, Some(6));
    }

    #[test]
    fn test_serialized_visitor_reads_back_equal() {
        let visitor = alice();
        let json = serde_json::to_string(&visitor).unwrap();
        assert_eq!(serde_json::from_str::<Visitor>(&json).unwrap(), visitor);
    }

    #[test]
    fn test_display() {
        let visitor = Visitor::new(
            VisitorId::from("V9"),
            "Edge Case",
            "Unknown",
            vec![VisitDraft::new("P1", "29/02/2024", Some(5))],
        );
        assert_eq!(
            visitor.to_string(),
            "Visitor(id='V9', name='Edge Case', nationality='Unknown', visits=[P1 on 29/02/2024 (rating 5)])"
        );
    }
}
