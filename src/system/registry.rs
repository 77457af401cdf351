//! POI management system state and mutations
//!
//! This module contains the [`PoiManagementSystem`] struct: the owner of every
//! POI, visitor and POI type. All cross-entity invariants live here:
//!
//! - `poi_types[t].num_pois` equals the number of POIs whose type is `t`
//! - deleting a POI removes every visit record that references it
//! - POI ids are unique and indexed for lookup
//!
//! Spatial queries and visit analytics are implemented in
//! [`crate::system::queries`] and [`crate::system::analytics`].

use crate::poi::{Attributes, Poi, PoiType};
use crate::system::error::ValidationError;
use crate::types::{point_in_bounds, require_finite, AttributeValue, PoiId, VisitorId};
use crate::visitor::{VisitDraft, Visitor};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

/// A visit as submitted to [`PoiManagementSystem::add_visitor`]: the POI is
/// referenced by name and resolved to its id on insertion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisitRequest {
    /// Name of the visited POI
    pub poi_name: String,
    /// Visit date, `DD/MM/YYYY`
    pub date: Option<String>,
    /// Raw rating
    pub rating: Option<i64>,
}

impl VisitRequest {
    /// Create a visit request
    pub fn new(poi_name: impl Into<String>, date: impl Into<String>, rating: Option<i64>) -> Self {
        Self { poi_name: poi_name.into(), date: Some(date.into()), rating }
    }
}

/// In-memory catalog of POI types, POIs and visitors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PoiManagementSystem {
    pub(crate) poi_types: BTreeMap<String, PoiType>,
    pub(crate) pois: Vec<Poi>,
    pub(crate) visitors: Vec<Visitor>,
    /// Quick lookup map from POI id to index in `pois`
    #[serde(skip)]
    poi_index: HashMap<PoiId, usize>,
}

impl PoiManagementSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the POI type registry
    pub fn poi_types(&self) -> BTreeMap<String, PoiType> {
        self.poi_types.clone()
    }

    /// Look up one registry entry
    pub fn poi_type(&self, name: &str) -> Option<&PoiType> {
        self.poi_types.get(name)
    }

    /// Copy of all POIs in insertion order
    pub fn pois(&self) -> Vec<Poi> {
        self.pois.clone()
    }

    /// Copy of all visitors in insertion order
    pub fn visitors(&self) -> Vec<Visitor> {
        self.visitors.clone()
    }

    /// Number of POIs
    pub fn poi_count(&self) -> usize {
        self.pois.len()
    }

    /// Number of visitors
    pub fn visitor_count(&self) -> usize {
        self.visitors.len()
    }

    /// Look up a POI by id
    pub fn get_poi(&self, poi_id: &PoiId) -> Option<&Poi> {
        self.poi_index.get(poi_id).and_then(|&idx| self.pois.get(idx))
    }

    /// First POI with the given name
    pub fn find_poi_by_name(&self, name: &str) -> Option<&Poi> {
        self.pois.iter().find(|p| p.name() == name)
    }

    /// First visitor with the given name
    pub fn find_visitor_by_name(&self, name: &str) -> Option<&Visitor> {
        self.visitors.iter().find(|v| v.name() == name)
    }

    /// Rebuild the id index (call after removing POIs)
    fn rebuild_indices(&mut self) {
        self.poi_index.clear();
        for (idx, poi) in self.pois.iter().enumerate() {
            self.poi_index.insert(poi.id().clone(), idx);
        }
    }

    /// Id of the last POI named `poi_name`
    fn resolve_poi_name(&self, poi_name: &str) -> Option<PoiId> {
        self.pois.iter().rev().find(|p| p.name() == poi_name).map(|p| p.id().clone())
    }

    // ------------------------------------------------------------------
    // POI types
    // ------------------------------------------------------------------

    /// Register a POI type, replacing any entry of the same name.
    ///
    /// Non-text attribute names are dropped. The member count of the new
    /// entry starts at zero even when it replaces an existing type.
    pub fn add_poi_type<I, A>(&mut self, name: &str, attributes: I) -> bool
    where
        I: IntoIterator<Item = A>,
        A: Into<AttributeValue>,
    {
        let attributes: Vec<String> = attributes
            .into_iter()
            .filter_map(|a| match a.into() {
                AttributeValue::Text(s) => Some(s),
                _ => None,
            })
            .collect();

        if let Some(previous) = self.poi_types.get(name) {
            if previous.num_pois > 0 {
                warn!(
                    poi_type = name,
                    num_pois = previous.num_pois,
                    "Replacing POI type resets its POI count"
                );
            }
        }

        debug!(poi_type = name, attributes = ?attributes, "Registered POI type");
        self.poi_types.insert(name.to_string(), PoiType::new(attributes));
        true
    }

    /// Declare an extra attribute on a type, creating the type if needed
    pub fn add_poi_type_attribute(&mut self, poi_type: &str, attribute: &str) -> bool {
        match self.poi_types.get_mut(poi_type) {
            Some(entry) => entry.extend_attributes([attribute]),
            None => {
                self.add_poi_type(poi_type, [attribute]);
            }
        }
        true
    }

    /// Remove a type that has no POIs
    pub fn delete_poi_type(&mut self, poi_type: &str) -> bool {
        let num_pois = match self.poi_types.get(poi_type) {
            Some(entry) => entry.num_pois,
            None => {
                warn!("No {} exist in POI types", poi_type);
                return false;
            }
        };

        if num_pois != 0 {
            warn!("{} has {} POIs. Not deleting.", poi_type, num_pois);
            return false;
        }
        self.poi_types.remove(poi_type);
        true
    }

    /// Remove an attribute from a type's declaration.
    ///
    /// Returns `true` whenever the type exists, whether or not the
    /// attribute was declared. POIs keep their attribute values.
    pub fn delete_poi_type_attribute(&mut self, poi_type: &str, attribute: &str) -> bool {
        match self.poi_types.get_mut(poi_type) {
            Some(entry) => {
                if !entry.remove_attribute(attribute) {
                    debug!(poi_type, attribute, "Attribute was not declared on POI type");
                }
                true
            }
            None => {
                warn!("`{}` is non-existent in POI types", poi_type);
                false
            }
        }
    }

    /// Rename a type and retarget all of its POIs.
    ///
    /// Renaming onto an existing type merges the two entries.
    pub fn rename_poi_type(&mut self, old_poi_type: &str, new_poi_type: &str) -> bool {
        let Some(moved) = self.poi_types.remove(old_poi_type) else {
            warn!("`{}` is non-existent in POI types", old_poi_type);
            return false;
        };

        match self.poi_types.get_mut(new_poi_type) {
            Some(existing) => {
                info!(from = old_poi_type, into = new_poi_type, "Merging POI types");
                existing.extend_attributes(moved.attributes);
                existing.num_pois += moved.num_pois;
            }
            None => {
                self.poi_types.insert(new_poi_type.to_string(), moved);
            }
        }

        for poi in self.pois.iter_mut().filter(|p| p.poi_type() == old_poi_type) {
            poi.set_poi_type(new_poi_type);
        }
        true
    }

    /// Rename a declared attribute of a type and on every POI of that type
    pub fn rename_poi_type_attribute(
        &mut self,
        poi_type: &str,
        old_attribute: &str,
        new_attribute: &str,
    ) -> bool {
        let Some(entry) = self.poi_types.get_mut(poi_type) else {
            warn!("`{}` is non-existent in POI types.", poi_type);
            return false;
        };

        if !entry.has_attribute(old_attribute) {
            warn!("`{}` is non-existent in {} attributes.", old_attribute, poi_type);
            return false;
        }
        entry.rename_attribute(old_attribute, new_attribute);

        for poi in self
            .pois
            .iter_mut()
            .filter(|p| p.poi_type() == poi_type && p.has_attribute(old_attribute))
        {
            poi.change_attribute_name(old_attribute, new_attribute);
        }
        true
    }

    // ------------------------------------------------------------------
    // POIs
    // ------------------------------------------------------------------

    /// Add a POI with a freshly generated id.
    ///
    /// Non-finite coordinates are an error. Coordinates outside `[0, 1000]`
    /// return `Ok(false)` and leave the system unchanged. The POI type is
    /// created from the POI's attribute names if unknown, and otherwise
    /// extended with any attribute names it does not declare yet.
    pub fn add_poi(
        &mut self,
        name: &str,
        poi_type: &str,
        x: f64,
        y: f64,
        attributes: Option<Attributes>,
    ) -> Result<bool, ValidationError> {
        let x = require_finite(x, "poi_x")?;
        let y = require_finite(y, "poi_y")?;

        if !point_in_bounds(x, y) {
            warn!("Invalid coordinates for POI `{}`: ({}, {})", name, x, y);
            return Ok(false);
        }

        let poi = Poi::new(PoiId::generate(), name, poi_type, x, y, attributes);

        let entry = self
            .poi_types
            .entry(poi_type.to_string())
            .or_insert_with(|| PoiType::new(Vec::new()));
        entry.extend_attributes(poi.attribute_names());
        entry.num_pois += 1;

        debug!(poi_id = %poi.id(), poi_name = name, poi_type, "Added POI");
        self.poi_index.insert(poi.id().clone(), self.pois.len());
        self.pois.push(poi);
        Ok(true)
    }

    /// Delete the first POI with the given name.
    ///
    /// Every visit record referencing the POI is removed from every visitor.
    pub fn delete_poi(&mut self, poi_name: &str) -> bool {
        let Some(idx) = self.pois.iter().position(|p| p.name() == poi_name) else {
            warn!("Trying to delete non-existent POI: {}", poi_name);
            return false;
        };

        let removed = self.pois.remove(idx);
        self.rebuild_indices();

        if let Some(entry) = self.poi_types.get_mut(removed.poi_type()) {
            entry.num_pois = entry.num_pois.saturating_sub(1);
        }

        let poi_id = removed.id().as_str();
        let mut pruned = 0;
        for visitor in &mut self.visitors {
            while visitor.has_visited_poi(poi_id) {
                visitor.delete_visit(poi_id);
                pruned += 1;
            }
        }

        debug!(poi_id, pruned_visits = pruned, "Deleted POI");
        true
    }

    // ------------------------------------------------------------------
    // Visitors
    // ------------------------------------------------------------------

    /// Add a visitor with a freshly generated id.
    ///
    /// Visits naming an unknown POI are dropped. The remaining visits are
    /// validated by [`Visitor::new`].
    pub fn add_visitor(&mut self, name: &str, nationality: &str, visits: Vec<VisitRequest>) -> bool {
        let drafts: Vec<VisitDraft> = visits
            .into_iter()
            .filter_map(|visit| {
                let poi_id = self.resolve_poi_name(&visit.poi_name);
                if poi_id.is_none() {
                    debug!(poi_name = %visit.poi_name, "Dropping visit to unknown POI");
                }
                poi_id.map(|id| VisitDraft { poi_id: Some(id), date: visit.date, rating: visit.rating })
            })
            .collect();

        let visitor = Visitor::new(VisitorId::generate(), name, nationality, drafts);
        debug!(visitor_id = %visitor.id(), visitor_name = name, visits = visitor.num_visits(), "Added visitor");
        self.visitors.push(visitor);
        true
    }

    /// Record a visit of an existing visitor to an existing POI
    pub fn add_visit(&mut self, visitor_name: &str, poi_name: &str, date: &str, rating: Option<i64>) -> bool {
        let Some(poi_id) = self.resolve_poi_name(poi_name) else {
            warn!("`{}` not in POIs", poi_name);
            return false;
        };

        match self.visitors.iter_mut().find(|v| v.name() == visitor_name) {
            Some(visitor) => visitor.add_visit(poi_id, date, rating),
            None => {
                warn!("`{}` not in Visitors", visitor_name);
                false
            }
        }
    }

    /// Delete the first visitor with the given name
    pub fn delete_visitor(&mut self, visitor_name: &str) -> bool {
        match self.visitors.iter().position(|v| v.name() == visitor_name) {
            Some(idx) => {
                let removed = self.visitors.remove(idx);
                debug!(visitor_id = %removed.id(), "Deleted visitor");
                true
            }
            None => {
                warn!("Trying to delete non-existent Visitor: {}", visitor_name);
                false
            }
        }
    }
}

impl fmt::Display for PoiManagementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PoiManagementSystem(")?;
        writeln!(f, "  poi_types=[")?;
        for (name, entry) in &self.poi_types {
            writeln!(
                f,
                "    {}: attributes=[{}], num_pois={}",
                name,
                entry.attributes.join(", "),
                entry.num_pois
            )?;
        }
        writeln!(f, "  ],")?;
        writeln!(f, "  pois=[")?;
        for poi in &self.pois {
            writeln!(f, "    {},", poi)?;
        }
        writeln!(f, "  ],")?;
        writeln!(f, "  visitors=[")?;
        for visitor in &self.visitors {
            writeln!(f, "    {},", visitor)?;
        }
        write!(f, "  ]\n)")
    }
}
