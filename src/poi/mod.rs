//! Points of interest and their types
//!
//! This module contains the POI entity and the registry entry describing a
//! POI type.
//!
//! # Usage Example
//!
//! ```rust
//! use poims::poi::*;
//! use poims::types::PoiId;
//!
//! let mut poi = Poi::new(PoiId::from("P001"), "Louvre Abu Dhabi", "museum", 100.0, 200.0, None);
//! poi.add_attribute("opening_hours", "10:00-18:00");
//! assert!(poi.change_attribute_name("opening_hours", "business_hours"));
//! assert_eq!(poi.attribute_names(), vec!["business_hours"]);
//!
//! let mut museum = PoiType::new(vec!["opening_hours".to_string()]);
//! museum.extend_attributes(poi.attribute_names());
//! assert_eq!(museum.attributes.len(), 2);
//! ```

pub mod poi;
pub mod poi_type;

pub use poi::{Attributes, Poi};
pub use poi_type::PoiType;
