//! Visitors and their visit history
//!
//! # Usage Example
//!
//! ```rust
//! use poims::visitor::*;
//! use poims::types::VisitorId;
//!
//! let mut visitor = Visitor::new(VisitorId::from("V001"), "Alice Johnson", "American", Vec::new());
//! assert!(visitor.add_visit("P001", "29/02/2024", Some(8)));
//! assert!(!visitor.add_visit("P002", "29/02/2023", Some(8)));
//! assert_eq!(visitor.num_visits(), 1);
//! assert_eq!(visitor.average_rating(), Some(8.0));
//! ```

pub mod visit;
pub mod visitor;

pub use visit::{is_valid_visit_date, normalize_rating, VisitDraft, VisitRecord, VISIT_DATE_FORMAT};
pub use visitor::Visitor;
