//! Enumeration types for the POI catalog
//!
//! This module contains the enumerations shared by the library and the
//! command line front-end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats for catalog reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Human-readable plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "Text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "plain" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_display() {
        assert_eq!(format!("{}", ReportFormat::Text), "Text");
        assert_eq!(format!("{}", ReportFormat::Json), "JSON");
    }

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("plain".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);

        // Test error case
        assert!("csv".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_report_format_default() {
        assert_eq!(ReportFormat::default(), ReportFormat::Text);
    }
}
