//! The POI management system
//!
//! This module contains the aggregate that owns every POI, visitor and POI
//! type, together with its queries, analytics, configuration loading,
//! reporting and logging setup.
//!
//! # Overview
//!
//! - **Registry**: CRUD over POI types, POIs and visitors
//! - **Queries**: nearest pair, radius, k-closest and boundary searches
//! - **Analytics**: visit counts, rankings and coverage analysis
//! - **Loader**: lenient YAML catalog loading
//! - **Statistics**: totals, consistency checks and the overview report
//!
//! # Usage Example
//!
//! ```rust
//! use poims::system::*;
//!
//! let mut system = PoiManagementSystem::new();
//! system.add_poi_type("museum", ["opening_hours"]);
//! system.add_poi("Louvre Abu Dhabi", "museum", 100.0, 200.0, None)?;
//! system.add_poi("Grand Mosque", "landmark", 400.0, 600.0, None)?;
//! system.add_visitor(
//!     "Alice",
//!     "American",
//!     vec![VisitRequest::new("Louvre Abu Dhabi", "19/09/2024", Some(9))],
//! );
//!
//! let closest = system.get_k_closest_pois(0.0, 0.0, 1)?;
//! assert_eq!(closest[0].name, "Louvre Abu Dhabi");
//! assert_eq!(system.get_crowdest_k_pois(1)[0].1, "Louvre Abu Dhabi");
//! # Ok::<(), ValidationError>(())
//! ```

pub mod analytics;
pub mod error;
pub mod loader;
pub mod logging;
pub mod queries;
pub mod registry;
pub mod statistics;

pub use analytics::{PoiVisit, SpecialVisitor, VisitedPoi};
pub use error::{CatalogError, CatalogResult, ValidationError};
pub use loader::{parse_catalog, read_catalog_file, LoadSummary};
pub use logging::{LoggingConfig, LoggingGuard};
pub use queries::{PoiDistance, PoiSummary};
pub use registry::{PoiManagementSystem, VisitRequest};
pub use statistics::{CountMismatch, MapExtent, SystemReport, SystemStatistics, ValidationReport};
