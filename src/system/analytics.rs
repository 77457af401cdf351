//! Visitor and POI analytics
//!
//! Visit counts, rankings and the coverage analysis that selects visitors
//! who have seen at least `m` POIs spanning at least `t` POI types.

use crate::system::queries::clamp_to_population;
use crate::system::registry::PoiManagementSystem;
use crate::types::{PoiId, VisitorId};
use crate::visitor::VisitRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

/// A POI as seen in one visitor's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitedPoi {
    /// POI id
    pub poi_id: PoiId,
    /// POI name
    pub name: String,
    /// Visit date
    pub date: String,
}

/// A visitor meeting the coverage thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialVisitor {
    /// Visitor id
    pub visitor_id: VisitorId,
    /// Visitor name
    pub name: String,
    /// Visitor nationality
    pub nationality: String,
    /// Number of visits, repeats included
    pub total_visits: usize,
    /// Number of distinct POI types among the visited POIs
    pub distinct_poi_types: usize,
}

impl fmt::Display for SpecialVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} visits across {} POI types",
            self.name, self.nationality, self.total_visits, self.distinct_poi_types
        )
    }
}

/// One visit to a POI, attributed to the visitor who made it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiVisit {
    /// Visitor name
    pub visitor_name: String,
    /// The visit record
    pub visit: VisitRecord,
}

impl PoiManagementSystem {
    /// POIs visited by the first visitor named `visitor_name`, in visit order
    pub fn get_visited_pois(&self, visitor_name: &str) -> Vec<VisitedPoi> {
        let Some(visitor) = self.find_visitor_by_name(visitor_name) else {
            warn!("`{}` not in Visitors", visitor_name);
            return Vec::new();
        };

        visitor
            .visits()
            .into_iter()
            .filter_map(|visit| {
                self.get_poi(&visit.poi_id).map(|poi| VisitedPoi {
                    poi_id: visit.poi_id.clone(),
                    name: poi.name().to_string(),
                    date: visit.date,
                })
            })
            .collect()
    }

    /// Visits recorded against each POI, in POI order
    pub fn get_num_visitors_per_poi(&self) -> Vec<(PoiId, usize)> {
        self.pois
            .iter()
            .map(|poi| {
                let count = self
                    .visitors
                    .iter()
                    .map(|v| v.visits_to_poi(poi.id().as_str()).len())
                    .sum();
                (poi.id().clone(), count)
            })
            .collect()
    }

    /// Visit count of each visitor, in visitor order
    pub fn get_num_pois_per_visitor(&self) -> Vec<(VisitorId, usize)> {
        self.visitors.iter().map(|v| (v.id().clone(), v.num_visits())).collect()
    }

    /// The `k` POIs with the most visits, ties broken by id
    pub fn get_crowdest_k_pois(&self, k: usize) -> Vec<(PoiId, String)> {
        let k = clamp_to_population(k, self.pois.len(), "POIs");

        let mut counts = self.get_num_visitors_per_poi();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        counts
            .into_iter()
            .take(k)
            .filter_map(|(id, _)| self.get_poi(&id).map(|poi| (id.clone(), poi.name().to_string())))
            .collect()
    }

    /// The `k` visitors with the most visits, ties broken by id
    pub fn get_most_visited_k_visitors(&self, k: usize) -> Vec<(VisitorId, String)> {
        let k = clamp_to_population(k, self.visitors.len(), "Visitors");

        let mut ranked: Vec<_> = self.visitors.iter().collect();
        ranked.sort_by(|a, b| b.num_visits().cmp(&a.num_visits()).then_with(|| a.id().cmp(b.id())));

        ranked.into_iter().take(k).map(|v| (v.id().clone(), v.name().to_string())).collect()
    }

    /// Visitors with at least `m` visits spanning at least `t` POI types
    pub fn get_special_visitors(&self, m: usize, t: usize) -> Vec<SpecialVisitor> {
        self.visitors
            .iter()
            .filter(|v| v.num_visits() >= m)
            .filter_map(|visitor| {
                let poi_types: BTreeSet<&str> = visitor
                    .unique_visited_poi_ids()
                    .iter()
                    .filter_map(|id| self.get_poi(id))
                    .map(|poi| poi.poi_type())
                    .collect();

                (poi_types.len() >= t).then(|| SpecialVisitor {
                    visitor_id: visitor.id().clone(),
                    name: visitor.name().to_string(),
                    nationality: visitor.nationality().to_string(),
                    total_visits: visitor.num_visits(),
                    distinct_poi_types: poi_types.len(),
                })
            })
            .collect()
    }

    /// Every visit to the first POI named `poi_name`, in visitor order
    pub fn get_poi_visit_history(&self, poi_name: &str) -> Vec<PoiVisit> {
        let Some(poi) = self.find_poi_by_name(poi_name) else {
            warn!("`{}` not in POIs", poi_name);
            return Vec::new();
        };

        self.visitors
            .iter()
            .flat_map(|visitor| {
                visitor.visits_to_poi(poi.id().as_str()).into_iter().map(|visit| PoiVisit {
                    visitor_name: visitor.name().to_string(),
                    visit,
                })
            })
            .collect()
    }
}
