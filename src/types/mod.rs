//! Core types and utilities for the POI catalog
//!
//! This module contains fundamental types, identifiers, geometry helpers and
//! configuration structures used throughout the catalog.
//!
//! # Overview
//!
//! - **Identifiers**: timestamp-based unique ids for POIs and visitors
//! - **Attributes**: the dynamic value type for free-form POI attributes
//! - **Geometry**: map bounds, default epsilon and Euclidean distance
//! - **Validation**: hard type guards raising [`crate::ValidationError`]
//! - **Configuration**: command line arguments for the front-end
//!
//! # Usage Example
//!
//! ```rust
//! use poims::types::*;
//!
//! let id = PoiId::generate();
//! assert!(id.as_str().starts_with("poi_"));
//!
//! assert_eq!(euclidean_distance(0.0, 0.0, 3.0, 4.0), Some(5.0));
//!
//! let fee = AttributeValue::from("63 AED");
//! assert!(require_type(&fee, ValueKind::Text, "entrance_fee").is_ok());
//! ```

pub mod attribute;
pub mod config;
pub mod enums;
pub mod geometry;
pub mod identifiers;
pub mod validation;

// Re-export all public types for convenience
pub use attribute::*;
pub use config::*;
pub use enums::*;
pub use geometry::*;
pub use identifiers::*;
pub use validation::*;
