//! Command line configuration for the catalog front-end
//!
//! This module contains the CLI argument structure and the validated run
//! configuration derived from it. The catalog data itself is configured
//! through YAML files, see [`crate::system::loader`].

use super::ReportFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of entries in the "top k" sections of a report
pub const DEFAULT_TOP_K: usize = 3;

/// Default minimum visit count for the coverage analysis
pub const DEFAULT_MIN_VISITS: usize = 2;

/// Default minimum distinct POI type count for the coverage analysis
pub const DEFAULT_MIN_TYPES: usize = 2;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "poims",
    version = "0.1.0",
    about = "POI Management System - catalog of points of interest, POI types and visitors",
    long_about = "Loads a catalog of points of interest, POI types and visitors from a YAML configuration and prints an overview report with proximity and visit analytics.

EXAMPLES:
    # Report on the bundled demo catalog
    poims --demo

    # Report on your own catalog
    poims --config catalog.yaml

    # Machine-readable output with the five most visited POIs
    poims --config catalog.yaml --format json --top 5

    # Only check the catalog for consistency problems
    poims --config catalog.yaml --validate-only

CONFIGURATION:
    The YAML file may contain three optional top-level keys:
    poi_types (mapping of type name to {attributes: [...]}),
    pois (list of {name, type, x, y, attributes?}) and
    visitors (list of {name, nationality, visits?: [{poi_name, date, rating?}]}).
    Malformed entries are skipped with a warning."
)]
pub struct CliArgs {
    /// Catalog configuration file path (YAML format)
    #[arg(
        short,
        long,
        help = "Catalog configuration file path (YAML format)",
        long_help = "Path to a YAML catalog configuration. A missing or unreadable file yields an empty catalog."
    )]
    pub config: Option<String>,

    /// Use the bundled demo catalog
    #[arg(long, help = "Run with the bundled demo catalog")]
    pub demo: bool,

    /// Number of entries in ranking sections
    #[arg(
        long,
        default_value_t = DEFAULT_TOP_K,
        help = "Number of entries in ranking sections",
        long_help = "Number of POIs and visitors listed in the most-visited rankings. Must be greater than 0. Default: 3"
    )]
    pub top: usize,

    /// Minimum total visits for the coverage analysis
    #[arg(long, default_value_t = DEFAULT_MIN_VISITS, help = "Minimum total visits for coverage analysis")]
    pub min_visits: usize,

    /// Minimum distinct POI types for the coverage analysis
    #[arg(long, default_value_t = DEFAULT_MIN_TYPES, help = "Minimum distinct POI types for coverage analysis")]
    pub min_types: usize,

    /// Report output format
    #[arg(long, help = "Report format (text or json)")]
    pub format: Option<String>,

    /// Only print the consistency report
    #[arg(long, help = "Only print the catalog consistency report")]
    pub validate_only: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Directory for rolling log files
    #[arg(long, help = "Also write logs to daily files in this directory")]
    pub log_dir: Option<String>,
}

/// Where the catalog data comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogSource {
    /// Start from an empty catalog
    Empty,
    /// The demo catalog bundled with the binary
    Demo,
    /// A YAML file on disk
    File(PathBuf),
}

/// Validated configuration of a front-end run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Catalog data source
    pub source: CatalogSource,
    /// Entries in ranking sections
    pub top_k: usize,
    /// Minimum total visits for coverage analysis
    pub min_visits: usize,
    /// Minimum distinct POI types for coverage analysis
    pub min_types: usize,
    /// Report output format
    pub format: ReportFormat,
    /// Only print the consistency report
    pub validate_only: bool,
}

/// Validation errors for the run configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Both a file and the demo catalog were requested
    #[error("--config and --demo are mutually exclusive")]
    ConflictingSources,

    /// Ranking size is invalid
    #[error("Ranking size must be greater than 0, got {0}")]
    InvalidTopK(usize),

    /// Unknown report format
    #[error("Invalid report format: {0}")]
    InvalidFormat(String),
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::Empty,
            top_k: DEFAULT_TOP_K,
            min_visits: DEFAULT_MIN_VISITS,
            min_types: DEFAULT_MIN_TYPES,
            format: ReportFormat::default(),
            validate_only: false,
        }
    }
}

impl ReportConfig {
    /// Create a run configuration from parsed CLI arguments
    pub fn from_cli_args(args: &CliArgs) -> Result<Self, ConfigValidationError> {
        let source = match (&args.config, args.demo) {
            (Some(_), true) => return Err(ConfigValidationError::ConflictingSources),
            (Some(path), false) => CatalogSource::File(PathBuf::from(path)),
            (None, true) => CatalogSource::Demo,
            (None, false) => CatalogSource::Empty,
        };

        let format = match &args.format {
            Some(raw) => raw.parse().map_err(ConfigValidationError::InvalidFormat)?,
            None => ReportFormat::default(),
        };

        let config = Self {
            source,
            top_k: args.top,
            min_visits: args.min_visits,
            min_types: args.min_types,
            format,
            validate_only: args.validate_only,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK(self.top_k));
        }
        Ok(())
    }
}
