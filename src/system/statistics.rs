//! Statistics collection and reporting
//!
//! This module contains catalog-wide statistics, the consistency report and
//! the combined overview report printed by the command line front-end.

use crate::poi::PoiType;
use crate::system::analytics::SpecialVisitor;
use crate::system::registry::PoiManagementSystem;
use crate::types::{point_in_bounds, PoiId, VisitorId, MAP_MAX, MAP_MIN};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Catalog-wide totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatistics {
    /// Number of registered POI types
    pub total_poi_types: usize,
    /// Number of POIs
    pub total_pois: usize,
    /// Number of visitors
    pub total_visitors: usize,
    /// Number of visit records across all visitors
    pub total_visits: usize,
    /// Number of distinct POIs with at least one visit
    pub visited_pois: usize,
}

impl SystemStatistics {
    /// Average number of visits per visitor
    pub fn average_visits_per_visitor(&self) -> f64 {
        if self.total_visitors == 0 {
            0.0
        } else {
            self.total_visits as f64 / self.total_visitors as f64
        }
    }

    /// Percentage of POIs with at least one visit
    pub fn coverage_percentage(&self) -> f64 {
        if self.total_pois == 0 {
            0.0
        } else {
            (self.visited_pois as f64 / self.total_pois as f64) * 100.0
        }
    }
}

impl fmt::Display for SystemStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total POI Types: {}", self.total_poi_types)?;
        writeln!(f, "Total POIs: {}", self.total_pois)?;
        writeln!(f, "Total Visitors: {}", self.total_visitors)?;
        writeln!(f, "Total Visits: {}", self.total_visits)?;
        writeln!(f, "Average visits per visitor: {:.1}", self.average_visits_per_visitor())?;
        write!(
            f,
            "POI Coverage: {}/{} ({:.1}%)",
            self.visited_pois,
            self.total_pois,
            self.coverage_percentage()
        )
    }
}

/// A registry counter that disagrees with the actual number of POIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    /// POI type
    pub poi_type: String,
    /// Counter stored in the registry
    pub recorded: usize,
    /// POIs actually of that type
    pub actual: usize,
}

/// Consistency problems found in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Names of POIs whose type is not registered
    pub orphaned_pois: Vec<String>,
    /// Visit records referencing a POI id that does not exist
    pub invalid_visit_references: usize,
    /// Names of POIs outside the map bounds
    pub out_of_bounds_pois: Vec<String>,
    /// Registry counters that disagree with POI membership
    pub count_mismatches: Vec<CountMismatch>,
}

impl ValidationReport {
    /// Check whether no problem was found
    pub fn is_consistent(&self) -> bool {
        self.orphaned_pois.is_empty()
            && self.invalid_visit_references == 0
            && self.out_of_bounds_pois.is_empty()
            && self.count_mismatches.is_empty()
    }

    /// Number of problems found
    pub fn issue_count(&self) -> usize {
        self.orphaned_pois.len()
            + self.invalid_visit_references
            + self.out_of_bounds_pois.len()
            + self.count_mismatches.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 5;

        if self.orphaned_pois.is_empty() {
            writeln!(f, "[ok] All POIs have valid POI types")?;
        } else {
            writeln!(f, "[warn] Orphaned POIs (missing POI type): {}", self.orphaned_pois.len())?;
            for name in self.orphaned_pois.iter().take(SHOWN) {
                writeln!(f, "    - {}", name)?;
            }
            if self.orphaned_pois.len() > SHOWN {
                writeln!(f, "    ... and {} more", self.orphaned_pois.len() - SHOWN)?;
            }
        }

        if self.invalid_visit_references == 0 {
            writeln!(f, "[ok] All visitor visits reference valid POIs")?;
        } else {
            writeln!(f, "[warn] Invalid visitor visits (POI not found): {}", self.invalid_visit_references)?;
        }

        if self.out_of_bounds_pois.is_empty() {
            writeln!(f, "[ok] All POI coordinates are within bounds")?;
        } else {
            writeln!(f, "[warn] POIs with invalid coordinates: {}", self.out_of_bounds_pois.len())?;
        }

        if self.count_mismatches.is_empty() {
            write!(f, "[ok] POI type counters match their members")
        } else {
            write!(f, "[warn] POI type counters out of sync: {}", self.count_mismatches.len())?;
            for mismatch in &self.count_mismatches {
                write!(
                    f,
                    "\n    - {}: recorded {}, actual {}",
                    mismatch.poi_type, mismatch.recorded, mismatch.actual
                )?;
            }
            Ok(())
        }
    }
}

/// Spread of the POIs over the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    /// Smallest and largest x coordinate
    pub x_range: (f64, f64),
    /// Smallest and largest y coordinate
    pub y_range: (f64, f64),
    /// Mean position of all POIs
    pub center_of_mass: (f64, f64),
}

impl fmt::Display for MapExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "X-range: {:.1} to {:.1}", self.x_range.0, self.x_range.1)?;
        writeln!(f, "Y-range: {:.1} to {:.1}", self.y_range.0, self.y_range.1)?;
        write!(f, "Center of mass: ({:.1}, {:.1})", self.center_of_mass.0, self.center_of_mass.1)
    }
}

/// Overview report combining statistics, rankings and consistency checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    /// Catalog-wide totals
    pub statistics: SystemStatistics,
    /// POI type registry
    pub poi_types: BTreeMap<String, PoiType>,
    /// Spread of the POIs, absent for an empty catalog
    pub map_extent: Option<MapExtent>,
    /// Most visited POIs
    pub crowded_pois: Vec<(PoiId, String)>,
    /// Visitors with the most visits
    pub top_visitors: Vec<(VisitorId, String)>,
    /// Minimum visits used for the coverage analysis
    pub min_visits: usize,
    /// Minimum distinct POI types used for the coverage analysis
    pub min_types: usize,
    /// Visitors meeting both coverage thresholds
    pub special_visitors: Vec<SpecialVisitor>,
    /// Consistency problems
    pub validation: ValidationReport,
}

impl SystemReport {
    /// Render the report as human-readable text
    pub fn render_text(&self) -> String {
        let mut output = String::new();

        output.push_str("=== SYSTEM STATISTICS ===\n");
        output.push_str(&format!("{}\n\n", self.statistics));

        output.push_str("=== POI TYPE DETAILS ===\n");
        if self.poi_types.is_empty() {
            output.push_str("No POI types available.\n");
        }
        for (name, entry) in &self.poi_types {
            let attributes =
                if entry.attributes.is_empty() { "None".to_string() } else { entry.attributes.join(", ") };
            output.push_str(&format!("{}:\n", name));
            output.push_str(&format!("  POI Count: {}\n", entry.num_pois));
            output.push_str(&format!("  Attributes: {}\n", attributes));
        }
        output.push('\n');

        output.push_str("=== MAP BOUNDARY INFORMATION ===\n");
        output.push_str(&format!("Map Size: {} x {} grid\n", MAP_MAX - MAP_MIN, MAP_MAX - MAP_MIN));
        match &self.map_extent {
            Some(extent) => output.push_str(&format!("{}\n\n", extent)),
            None => output.push_str("No POIs to analyze.\n\n"),
        }

        output.push_str(&format!("=== TOP {} MOST VISITED POIS ===\n", self.crowded_pois.len()));
        for (rank, (id, name)) in self.crowded_pois.iter().enumerate() {
            output.push_str(&format!("{}. {} ({})\n", rank + 1, name, id));
        }
        output.push('\n');

        output.push_str(&format!("=== TOP {} VISITORS ===\n", self.top_visitors.len()));
        for (rank, (id, name)) in self.top_visitors.iter().enumerate() {
            output.push_str(&format!("{}. {} ({})\n", rank + 1, name, id));
        }
        output.push('\n');

        output.push_str(&format!(
            "=== VISITORS WITH >= {} VISITS ACROSS >= {} POI TYPES ===\n",
            self.min_visits, self.min_types
        ));
        if self.special_visitors.is_empty() {
            output.push_str("None\n");
        }
        for visitor in &self.special_visitors {
            output.push_str(&format!("- {}\n", visitor));
        }
        output.push('\n');

        output.push_str("=== SYSTEM VALIDATION REPORT ===\n");
        output.push_str(&format!("{}\n", self.validation));
        output
    }

    /// Render the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl PoiManagementSystem {
    /// Catalog-wide totals
    pub fn statistics(&self) -> SystemStatistics {
        let mut visited: HashSet<PoiId> = HashSet::new();
        for visitor in &self.visitors {
            for poi_id in visitor.visited_poi_ids() {
                if self.get_poi(&poi_id).is_some() {
                    visited.insert(poi_id);
                }
            }
        }

        SystemStatistics {
            total_poi_types: self.poi_types.len(),
            total_pois: self.pois.len(),
            total_visitors: self.visitors.len(),
            total_visits: self.visitors.iter().map(|v| v.num_visits()).sum(),
            visited_pois: visited.len(),
        }
    }

    /// Check the catalog for consistency problems
    pub fn validation_report(&self) -> ValidationReport {
        let orphaned_pois = self
            .pois
            .iter()
            .filter(|p| !self.poi_types.contains_key(p.poi_type()))
            .map(|p| p.name().to_string())
            .collect();

        let invalid_visit_references = self
            .visitors
            .iter()
            .flat_map(|v| v.visited_poi_ids())
            .filter(|id| self.get_poi(id).is_none())
            .count();

        let out_of_bounds_pois = self
            .pois
            .iter()
            .filter(|p| !point_in_bounds(p.x(), p.y()))
            .map(|p| p.name().to_string())
            .collect();

        let count_mismatches = self
            .poi_types
            .iter()
            .filter_map(|(name, entry)| {
                let actual = self.pois.iter().filter(|p| p.poi_type() == name).count();
                (actual != entry.num_pois).then(|| CountMismatch {
                    poi_type: name.clone(),
                    recorded: entry.num_pois,
                    actual,
                })
            })
            .collect();

        ValidationReport { orphaned_pois, invalid_visit_references, out_of_bounds_pois, count_mismatches }
    }

    /// Coordinate ranges and centre of mass, `None` without POIs
    pub fn map_extent(&self) -> Option<MapExtent> {
        let first = self.pois.first()?;
        let (mut min_x, mut min_y) = first.coordinates();
        let (mut max_x, mut max_y) = (min_x, min_y);
        let (mut sum_x, mut sum_y) = (0.0, 0.0);

        for poi in &self.pois {
            let (x, y) = poi.coordinates();
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            sum_x += x;
            sum_y += y;
        }

        let count = self.pois.len() as f64;
        Some(MapExtent {
            x_range: (min_x, max_x),
            y_range: (min_y, max_y),
            center_of_mass: (sum_x / count, sum_y / count),
        })
    }

    /// Build the overview report
    pub fn report(&self, k: usize, min_visits: usize, min_types: usize) -> SystemReport {
        SystemReport {
            statistics: self.statistics(),
            poi_types: self.poi_types(),
            map_extent: self.map_extent(),
            crowded_pois: self.get_crowdest_k_pois(k),
            top_visitors: self.get_most_visited_k_visitors(k),
            min_visits,
            min_types,
            special_visitors: self.get_special_visitors(min_visits, min_types),
            validation: self.validation_report(),
        }
    }
}
