//! Point of interest entity
//!
//! This module contains the Poi struct. Identity (id, name, coordinates) is
//! fixed at construction; only the POI type and the attribute map can change,
//! and only through the methods below.

use crate::types::{AttributeValue, PoiId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Free-form attribute map of a POI
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Represents a point of interest on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    id: PoiId,
    name: String,
    poi_type: String,
    x: f64,
    y: f64,
    attributes: Attributes,
}

impl Poi {
    /// Create a new POI.
    ///
    /// Coordinates are not range checked here; the catalog validates them
    /// before constructing a POI.
    pub fn new(
        id: PoiId,
        name: impl Into<String>,
        poi_type: impl Into<String>,
        x: f64,
        y: f64,
        attributes: Option<Attributes>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            poi_type: poi_type.into(),
            x,
            y,
            attributes: attributes.unwrap_or_default(),
        }
    }

    /// Unique identifier of the POI
    pub fn id(&self) -> &PoiId {
        &self.id
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category of the POI
    pub fn poi_type(&self) -> &str {
        &self.poi_type
    }

    /// X coordinate on the map
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate on the map
    pub fn y(&self) -> f64 {
        self.y
    }

    /// `(x, y)` location on the map
    pub fn coordinates(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Copy of the attribute map
    pub fn attributes(&self) -> Attributes {
        self.attributes.clone()
    }

    /// Look up a single attribute
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Check whether the POI carries an attribute
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Names of all attributes on this POI
    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    /// Change the POI type
    pub fn set_poi_type(&mut self, new_poi_type: impl Into<String>) {
        self.poi_type = new_poi_type.into();
    }

    /// Add or overwrite an attribute. Pass [`AttributeValue::Null`] for an
    /// attribute without a value.
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, returning whether it was present
    pub fn delete_attribute(&mut self, key: &str) -> bool {
        if self.attributes.remove(key).is_some() {
            true
        } else {
            warn!("'{}' not found in attributes", key);
            false
        }
    }

    /// Rename an attribute, keeping its value.
    ///
    /// An existing attribute named `new_key` is overwritten.
    pub fn change_attribute_name(&mut self, old_key: &str, new_key: impl Into<String>) -> bool {
        match self.attributes.remove(old_key) {
            Some(value) => {
                self.attributes.insert(new_key.into(), value);
                true
            }
            None => {
                warn!("'{}' not found in attributes", old_key);
                false
            }
        }
    }
}

impl fmt::Display for Poi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "POI(id='{}', name='{}', poi_type='{}', x={}, y={}, attributes={})",
            self.id,
            self.name,
            self.poi_type,
            self.x,
            self.y,
            AttributeValue::Map(self.attributes.clone())
        )
    }
}
