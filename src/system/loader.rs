//! Catalog configuration loading
//!
//! A catalog configuration is a YAML mapping with three optional sections:
//!
//! ```yaml
//! poi_types:
//!   museum:
//!     attributes: [opening_hours, entrance_fee]
//! pois:
//!   - {name: Louvre Abu Dhabi, type: museum, x: 100, y: 200, attributes: {entrance_fee: 63 AED}}
//! visitors:
//!   - name: Alice Johnson
//!     nationality: American
//!     visits:
//!       - {poi_name: Louvre Abu Dhabi, date: 19/09/2024, rating: 9}
//! ```
//!
//! Loading is lenient. A missing, unreadable or empty source yields an empty
//! system, and a malformed entry is skipped without affecting its
//! neighbours. Every accepted entry goes through the same public operations
//! as direct callers use.

use crate::system::error::{CatalogError, CatalogResult};
use crate::system::registry::{PoiManagementSystem, VisitRequest};
use crate::types::{require_number, require_str, require_type, AttributeValue, ValueKind};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Counts of what a load accepted and skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// POI types registered
    pub poi_types: usize,
    /// POIs added
    pub pois: usize,
    /// Visitors added
    pub visitors: usize,
    /// Entries skipped as malformed or rejected
    pub skipped: usize,
}

/// Parse YAML text into a catalog tree.
///
/// Empty text parses to [`AttributeValue::Null`]; any other non-mapping root
/// is an error. POI types whose name is not text are dropped.
pub fn parse_catalog(text: &str) -> CatalogResult<AttributeValue> {
    parse_catalog_text(text).map(|(catalog, _)| catalog)
}

/// Parse a catalog and count the POI type entries dropped for a non-text name
fn parse_catalog_text(text: &str) -> CatalogResult<(AttributeValue, usize)> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(text)?;
    let dropped = drop_unnamed_poi_types(&mut value);
    let catalog = AttributeValue::from(value);
    match catalog.kind() {
        ValueKind::Map | ValueKind::Null => Ok((catalog, dropped)),
        other => Err(CatalogError::InvalidRoot(other)),
    }
}

/// Remove `poi_types` entries keyed by a number, bool or other non-text value.
///
/// Must run on the raw YAML: converted mappings key everything by text.
fn drop_unnamed_poi_types(value: &mut serde_yaml::Value) -> usize {
    let Some(poi_types) = value.get_mut("poi_types").and_then(serde_yaml::Value::as_mapping_mut) else {
        return 0;
    };

    let before = poi_types.len();
    poi_types.retain(|name, _| {
        if name.is_string() {
            return true;
        }
        warn!("Invalid poi_type name: {:?}. Skipping", name);
        false
    });
    before - poi_types.len()
}

/// Read and parse a catalog file
pub fn read_catalog_file(path: impl AsRef<Path>) -> CatalogResult<AttributeValue> {
    let text = fs::read_to_string(path)?;
    parse_catalog(&text)
}

impl PoiManagementSystem {
    /// Build a system from a YAML file, falling back to an empty system
    pub fn from_config_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut system = Self::new();

        if !path.exists() {
            warn!("'{}' file does not exist. Initializing from scratch.", path.display());
            return system;
        }

        let loaded = fs::read_to_string(path)
            .map_err(CatalogError::from)
            .and_then(|text| system.load_yaml_str(&text));
        match loaded {
            Ok(summary) => info!(path = %path.display(), ?summary, "Loaded catalog configuration"),
            Err(e) => warn!(category = e.category(), "Error loading config file: {}", e),
        }
        system
    }

    /// Build a system from YAML text, falling back to an empty system
    pub fn from_yaml_str(text: &str) -> Self {
        let mut system = Self::new();
        if let Err(e) = system.load_yaml_str(text) {
            warn!(category = e.category(), "Error loading config: {}", e);
        }
        system
    }

    /// Parse YAML text and load it into this system.
    ///
    /// Unlike [`Self::load_catalog`], the summary also counts POI types
    /// dropped during parsing for a non-text name.
    pub fn load_yaml_str(&mut self, text: &str) -> CatalogResult<LoadSummary> {
        let (catalog, dropped) = parse_catalog_text(text)?;
        let mut summary = self.load_catalog(&catalog);
        summary.skipped += dropped;
        Ok(summary)
    }

    /// Load every section of a parsed catalog into this system
    pub fn load_catalog(&mut self, catalog: &AttributeValue) -> LoadSummary {
        let mut summary = LoadSummary::default();

        if catalog.as_map().map_or(true, |m| m.is_empty()) {
            warn!("Config file is empty or invalid");
            return summary;
        }

        if let Some(section) = catalog.get("poi_types") {
            self.load_poi_types(section, &mut summary);
        }
        if let Some(section) = catalog.get("pois") {
            self.load_pois(section, &mut summary);
        }
        if let Some(section) = catalog.get("visitors") {
            self.load_visitors(section, &mut summary);
        }
        summary
    }

    fn load_poi_types(&mut self, section: &AttributeValue, summary: &mut LoadSummary) {
        let Some(poi_types) = section.as_map() else {
            warn!("`poi_types` must be a mapping, got {}. Skipping", section.kind());
            return;
        };

        for (name, definition) in poi_types {
            if definition.as_map().is_none() {
                warn!("Invalid poi_type: {}. Skipping", name);
                summary.skipped += 1;
                continue;
            }

            let attributes = definition
                .get("attributes")
                .and_then(AttributeValue::as_list)
                .map(<[AttributeValue]>::to_vec)
                .unwrap_or_default();

            self.add_poi_type(name, attributes);
            summary.poi_types += 1;
        }
    }

    fn load_pois(&mut self, section: &AttributeValue, summary: &mut LoadSummary) {
        let Some(pois) = section.as_list() else {
            warn!("`pois` must be a list, got {}. Skipping", section.kind());
            return;
        };

        for entry in pois {
            match self.load_poi(entry) {
                Ok(true) => summary.pois += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    warn!("Invalid POI {}: {}. Skipping", entry, e);
                    summary.skipped += 1;
                }
            }
        }
    }

    fn load_poi(&mut self, entry: &AttributeValue) -> CatalogResult<bool> {
        require_type(entry, ValueKind::Map, "poi")?;
        let name = require_str(field(entry, "name"), "name")?;
        let poi_type = require_str(field(entry, "type"), "type")?;
        let x = require_number(field(entry, "x"), "x")?;
        let y = require_number(field(entry, "y"), "y")?;
        let attributes = field(entry, "attributes").as_map().cloned();

        Ok(self.add_poi(name, poi_type, x, y, attributes)?)
    }

    fn load_visitors(&mut self, section: &AttributeValue, summary: &mut LoadSummary) {
        let Some(visitors) = section.as_list() else {
            warn!("`visitors` must be a list, got {}. Skipping", section.kind());
            return;
        };

        for entry in visitors {
            match self.load_visitor(entry) {
                Ok(()) => summary.visitors += 1,
                Err(e) => {
                    warn!("Invalid Visitor {}: {}. Skipping", entry, e);
                    summary.skipped += 1;
                }
            }
        }
    }

    fn load_visitor(&mut self, entry: &AttributeValue) -> CatalogResult<()> {
        require_type(entry, ValueKind::Map, "visitor")?;
        let name = require_str(field(entry, "name"), "name")?;
        let nationality = require_str(field(entry, "nationality"), "nationality")?;

        let visits = field(entry, "visits")
            .as_list()
            .unwrap_or_default()
            .iter()
            .filter_map(|visit| match visit_request(visit) {
                Ok(request) => Some(request),
                Err(e) => {
                    warn!("Invalid visit {} of `{}`: {}. Skipping", visit, name, e);
                    None
                }
            })
            .collect();

        self.add_visitor(name, nationality, visits);
        Ok(())
    }
}

static MISSING: AttributeValue = AttributeValue::Null;

/// Look up a key of a mapping entry, treating an absent key as null
fn field<'a>(entry: &'a AttributeValue, key: &str) -> &'a AttributeValue {
    entry.get(key).unwrap_or(&MISSING)
}

/// Convert one configured visit. A visit without a textual `poi_name` is an
/// error; date and rating are passed on for the visitor to validate.
fn visit_request(visit: &AttributeValue) -> CatalogResult<VisitRequest> {
    require_type(visit, ValueKind::Map, "visit")?;
    let poi_name = require_str(field(visit, "poi_name"), "poi_name")?;

    Ok(VisitRequest {
        poi_name: poi_name.to_string(),
        date: visit.get("date").and_then(AttributeValue::as_str).map(str::to_string),
        rating: visit.get("rating").and_then(AttributeValue::as_i64),
    })
}
