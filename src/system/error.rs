//! Error types and handling
//!
//! The catalog has two failure channels. Argument errors that indicate a
//! programming mistake are raised as [`ValidationError`]. Business-rule
//! violations (unknown names, out-of-range coordinates, bad radii) are not
//! errors at all: the operation returns `false` or an empty result and logs a
//! warning. [`CatalogError`] covers reading a catalog configuration.

use crate::types::ValueKind;
use thiserror::Error;

/// Hard argument errors raised by catalog operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// An argument had the wrong kind of value
    #[error("`{name}` must be {expected}, got {found}.")]
    InvalidType {
        /// Argument name
        name: String,
        /// Kind the argument must have
        expected: ValueKind,
        /// Kind that was supplied
        found: ValueKind,
    },

    /// A numeric argument was NaN or infinite
    #[error("`{name}` must be a finite number, got {value}.")]
    NonFiniteNumber {
        /// Argument name
        name: String,
        /// Value that was supplied
        value: f64,
    },
}

impl ValidationError {
    /// Create a wrong-kind error
    pub fn invalid_type(name: impl Into<String>, expected: ValueKind, found: ValueKind) -> Self {
        Self::InvalidType { name: name.into(), expected, found }
    }

    /// Create a non-finite number error
    pub fn non_finite(name: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteNumber { name: name.into(), value }
    }

    /// Name of the offending argument
    pub fn argument(&self) -> &str {
        match self {
            ValidationError::InvalidType { name, .. } => name,
            ValidationError::NonFiniteNumber { name, .. } => name,
        }
    }
}

/// Errors that can occur while reading a catalog configuration
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid YAML
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration root is not a mapping
    #[error("Catalog configuration must be a mapping, got {0}")]
    InvalidRoot(ValueKind),

    /// An entry failed a hard argument check
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            CatalogError::Io(_) => "IO",
            CatalogError::Yaml(_) => "YAML",
            CatalogError::InvalidRoot(_) => "Structure",
            CatalogError::Validation(_) => "Validation",
        }
    }
}

/// Result type for configuration loading
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_type_message() {
        let err = ValidationError::invalid_type("poi_type", ValueKind::Text, ValueKind::Integer);
        assert_eq!(err.to_string(), "`poi_type` must be string, got integer.");
        assert_eq!(err.argument(), "poi_type");
    }

    #[test]
    fn test_non_finite_message() {
        let err = ValidationError::non_finite("x", f64::NAN);
        assert!(matches!(err, ValidationError::NonFiniteNumber { .. }));
        assert_eq!(err.to_string(), "`x` must be a finite number, got NaN.");
    }

    #[test]
    fn test_catalog_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let catalog_error: CatalogError = io_error.into();
        assert!(matches!(catalog_error, CatalogError::Io(_)));
        assert_eq!(catalog_error.category(), "IO");
    }

    #[test]
    fn test_catalog_error_categories() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        assert_eq!(CatalogError::from(yaml_error).category(), "YAML");
        assert_eq!(CatalogError::InvalidRoot(ValueKind::List).category(), "Structure");

        let validation = ValidationError::invalid_type("name", ValueKind::Text, ValueKind::Null);
        let err = CatalogError::from(validation);
        assert_eq!(err.category(), "Validation");
        assert_eq!(err.to_string(), "Validation error: `name` must be string, got null.");
    }
}
