//! POI Management System
//!
//! An in-memory catalog of points of interest (POIs) on a bounded 2-D map,
//! the POI types that classify them and the visitors who visit them.
//!
//! # Overview
//!
//! The catalog keeps a registry of POI types with their declared attribute
//! names and member counts, the POIs themselves with free-form attributes,
//! and visitors with a validated visit history. On top of that state it
//! answers proximity queries and computes visit analytics.
//!
//! ## Key Features
//!
//! - **POI Type Registry**: declare, rename and delete types and their attributes
//! - **Referential Integrity**: deleting a POI removes every visit to it
//! - **Proximity Queries**: nearest pair, radius, k-closest and boundary searches
//! - **Visit Analytics**: rankings and multi-type coverage analysis
//! - **Lenient Loading**: YAML catalogs where malformed entries are skipped
//! - **Reporting**: statistics and consistency checks as text or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use poims::*;
//!
//! let yaml = r#"
//! poi_types:
//!   museum:
//!     attributes: [opening_hours]
//! pois:
//!   - {name: Louvre Abu Dhabi, type: museum, x: 100, y: 200}
//! visitors:
//!   - name: Alice Johnson
//!     nationality: American
//!     visits:
//!       - {poi_name: Louvre Abu Dhabi, date: 19/09/2024, rating: 9}
//! "#;
//!
//! let system = PoiManagementSystem::from_yaml_str(yaml);
//! let stats = system.statistics();
//! assert_eq!(stats.total_pois, 1);
//! assert_eq!(stats.total_visits, 1);
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: identifiers, attribute values, geometry and configuration
//! - [`poi`]: the POI entity and POI type registry entries
//! - [`visitor`]: visitors and visit records
//! - [`system`]: the management system, queries, analytics and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │     POI     │    │   Visitor   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Poi         │    │ Visitor     │
//! │ Attributes  │    │ PoiType     │    │ VisitRecord │
//! │ Geometry    │    │             │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//!        │           ┌──────────────────────────────┐
//!        └───────────┤            System            │
//!                    │                              │
//!                    │ Registry  Queries  Analytics │
//!                    │ Loader    Statistics         │
//!                    └──────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod poi;
pub mod system;
pub mod types;
pub mod visitor;

// Core types and identifiers
pub use types::{
    AttributeValue,
    CatalogSource,
    CliArgs,
    ConfigValidationError,
    // Identifiers
    PoiId,
    ReportConfig,
    // Enums
    ReportFormat,
    ValueKind,
    VisitorId,
};

// POI types and functionality
pub use poi::{Attributes, Poi, PoiType};

// Visitor types and functionality
pub use visitor::{VisitDraft, VisitRecord, Visitor};

// System types and functionality
pub use system::{
    CatalogError, LoadSummary, LoggingConfig, PoiDistance, PoiManagementSystem, PoiSummary,
    PoiVisit, SpecialVisitor, SystemReport, SystemStatistics, ValidationError, ValidationReport,
    VisitRequest, VisitedPoi,
};
