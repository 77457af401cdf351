//! Spatial and type queries over the POI catalog

use crate::poi::Poi;
use crate::system::error::ValidationError;
use crate::system::registry::PoiManagementSystem;
use crate::types::{euclidean_distance, point_in_bounds, require_finite, PoiId, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Identity and location of a POI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiSummary {
    /// POI id
    pub id: PoiId,
    /// POI name
    pub name: String,
    /// `(x, y)` location
    pub coordinates: (f64, f64),
}

impl From<&Poi> for PoiSummary {
    fn from(poi: &Poi) -> Self {
        Self { id: poi.id().clone(), name: poi.name().to_string(), coordinates: poi.coordinates() }
    }
}

/// A POI together with its distance to a query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiDistance {
    /// POI id
    pub id: PoiId,
    /// POI name
    pub name: String,
    /// `(x, y)` location
    pub coordinates: (f64, f64),
    /// POI type
    pub poi_type: String,
    /// Euclidean distance to the query point
    pub distance: f64,
}

impl PoiDistance {
    fn new(poi: &Poi, distance: f64) -> Self {
        Self {
            id: poi.id().clone(),
            name: poi.name().to_string(),
            coordinates: poi.coordinates(),
            poi_type: poi.poi_type().to_string(),
            distance,
        }
    }

    /// Order by distance, then id, then name
    fn proximity_order(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for PoiDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at ({}, {}): {:.1} away",
            self.name, self.poi_type, self.coordinates.0, self.coordinates.1, self.distance
        )
    }
}

/// Validate a query centre and radius, returning `Ok(false)` with a warning
/// when they are outside the accepted domain
fn check_query_area(x: f64, y: f64, r: f64) -> Result<bool, ValidationError> {
    require_finite(x, "x")?;
    require_finite(y, "y")?;
    require_finite(r, "r")?;

    if !point_in_bounds(x, y) {
        warn!("Coordinates ({}, {}) outside map bounds (0-1000)", x, y);
        return Ok(false);
    }
    if r < 0.0 {
        warn!("Radius cannot be negative, got {}", r);
        return Ok(false);
    }
    Ok(true)
}

/// Clamp a requested result count to the population size
pub(crate) fn clamp_to_population(k: usize, population: usize, what: &str) -> usize {
    if k > population {
        warn!(
            "Requested more than number of {} in the system. Returning all ({}) {}.",
            what, population, what
        );
        population
    } else {
        k
    }
}

impl PoiManagementSystem {
    /// Distances from `(x, y)` to every POI, in insertion order
    fn distances_from(&self, x: f64, y: f64) -> impl Iterator<Item = PoiDistance> + '_ {
        self.pois.iter().filter_map(move |poi| {
            euclidean_distance(x, y, poi.x(), poi.y()).map(|d| PoiDistance::new(poi, d))
        })
    }

    /// Copies of all POIs of a type
    pub fn get_pois_by_poi_type(&self, poi_type: &str) -> Vec<Poi> {
        self.pois.iter().filter(|p| p.poi_type() == poi_type).cloned().collect()
    }

    /// The closest pair of POIs, `None` with fewer than two POIs.
    ///
    /// Pairs are scanned in insertion order and only a strictly smaller
    /// distance replaces the current best, so ties keep the earliest pair.
    pub fn get_nearest_pois(&self) -> Option<(PoiSummary, PoiSummary)> {
        let mut best: Option<(f64, usize, usize)> = None;

        for (i, first) in self.pois.iter().enumerate() {
            for (j, second) in self.pois.iter().enumerate().skip(i + 1) {
                let Some(distance) = euclidean_distance(first.x(), first.y(), second.x(), second.y())
                else {
                    continue;
                };
                if best.map_or(true, |(smallest, _, _)| distance < smallest) {
                    best = Some((distance, i, j));
                }
            }
        }

        best.map(|(_, i, j)| (PoiSummary::from(&self.pois[i]), PoiSummary::from(&self.pois[j])))
    }

    /// Current member count of every registered type
    pub fn get_num_pois_per_poi_type(&self) -> BTreeMap<String, usize> {
        self.poi_types.iter().map(|(name, entry)| (name.clone(), entry.num_pois)).collect()
    }

    /// POIs within `r + epsilon` of `(x, y)`, in insertion order.
    ///
    /// An out-of-bounds centre or a negative radius yields an empty result.
    pub fn get_pois_within_distance(
        &self,
        x: f64,
        y: f64,
        r: f64,
        epsilon: Option<f64>,
    ) -> Result<Vec<PoiDistance>, ValidationError> {
        let epsilon = require_finite(epsilon.unwrap_or(DEFAULT_EPSILON), "epsilon")?;
        if !check_query_area(x, y, r)? {
            return Ok(Vec::new());
        }

        Ok(self.distances_from(x, y).filter(|p| p.distance <= r + epsilon).collect())
    }

    /// The `k` POIs closest to `(x, y)`, ordered by distance, id and name.
    ///
    /// A `k` larger than the population is clamped with a warning.
    pub fn get_k_closest_pois(&self, x: f64, y: f64, k: usize) -> Result<Vec<PoiDistance>, ValidationError> {
        require_finite(x, "x")?;
        require_finite(y, "y")?;

        let k = clamp_to_population(k, self.pois.len(), "POIs");
        let mut closest: Vec<PoiDistance> = self.distances_from(x, y).collect();
        closest.sort_by(PoiDistance::proximity_order);
        closest.truncate(k);
        Ok(closest)
    }

    /// POIs whose distance to `(x, y)` is within `epsilon` of exactly `r`.
    ///
    /// Requires a positive `epsilon`; invalid input yields an empty result.
    pub fn get_pois_in_boundary(
        &self,
        x: f64,
        y: f64,
        r: f64,
        epsilon: Option<f64>,
    ) -> Result<Vec<PoiDistance>, ValidationError> {
        let epsilon = require_finite(epsilon.unwrap_or(DEFAULT_EPSILON), "epsilon")?;
        if !check_query_area(x, y, r)? {
            return Ok(Vec::new());
        }
        if epsilon <= 0.0 {
            warn!("Epsilon must be positive, got {}", epsilon);
            return Ok(Vec::new());
        }

        Ok(self.distances_from(x, y).filter(|p| (p.distance - r).abs() <= epsilon).collect())
    }
}
