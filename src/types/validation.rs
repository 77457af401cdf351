//! Hard argument guards
//!
//! These helpers raise a [`ValidationError`] when an argument is of the wrong
//! kind. They are the hard failure channel: business-rule violations are
//! reported softly by the catalog operations themselves.

use crate::system::error::ValidationError;
use crate::types::attribute::{AttributeValue, ValueKind};

/// Require `value` to be of kind `expected`, naming the argument as `name`
pub fn require_type<'a>(
    value: &'a AttributeValue,
    expected: ValueKind,
    name: &str,
) -> Result<&'a AttributeValue, ValidationError> {
    if expected.matches(value) {
        Ok(value)
    } else {
        Err(ValidationError::invalid_type(name, expected, value.kind()))
    }
}

/// Require `value` to be text and borrow it
pub fn require_str<'a>(value: &'a AttributeValue, name: &str) -> Result<&'a str, ValidationError> {
    require_type(value, ValueKind::Text, name)?
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type(name, ValueKind::Text, value.kind()))
}

/// Require `value` to be a finite whole or real number
pub fn require_number(value: &AttributeValue, name: &str) -> Result<f64, ValidationError> {
    let number = require_type(value, ValueKind::Number, name)?
        .as_f64()
        .ok_or_else(|| ValidationError::invalid_type(name, ValueKind::Number, value.kind()))?;
    require_finite(number, name)
}

/// Require a plain `f64` argument to be finite
pub fn require_finite(value: f64, name: &str) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::non_finite(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_type_accepts_matching_kind() {
        let value = AttributeValue::from("museum");
        assert!(require_type(&value, ValueKind::Text, "poi_type").is_ok());
        assert_eq!(require_str(&value, "poi_type").unwrap(), "museum");
    }

    #[test]
    fn test_require_type_reports_name_and_kinds() {
        let value = AttributeValue::from(123);
        let err = require_str(&value, "poi_name").unwrap_err();
        assert_eq!(err.to_string(), "`poi_name` must be string, got integer.");
    }

    #[test]
    fn test_require_number_accepts_int_and_float() {
        assert_eq!(require_number(&AttributeValue::from(5), "x").unwrap(), 5.0);
        assert_eq!(require_number(&AttributeValue::from(2.5), "x").unwrap(), 2.5);
        assert!(require_number(&AttributeValue::from("5"), "x").is_err());
        assert!(require_number(&AttributeValue::Float(f64::NAN), "x").is_err());
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite(1.0, "r").is_ok());
        let err = require_finite(f64::INFINITY, "r").unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteNumber { .. }));
        assert_eq!(err.argument(), "r");
        assert_eq!(err.to_string(), ValidationError::non_finite("r", f64::INFINITY).to_string());
    }
}
