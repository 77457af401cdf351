//! POI type registry entries

use serde::{Deserialize, Serialize};

/// A POI category: its declared attribute names and live member count
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoiType {
    /// Expected attribute names, in declaration order
    pub attributes: Vec<String>,
    /// Number of POIs currently of this type
    pub num_pois: usize,
}

impl PoiType {
    /// Create an empty type declaring `attributes`
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes, num_pois: 0 }
    }

    /// Check whether an attribute is declared
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    /// Append attribute names that are not declared yet. Never removes any.
    pub fn extend_attributes<I, S>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for attribute in attributes {
            let attribute = attribute.into();
            if !self.has_attribute(&attribute) {
                self.attributes.push(attribute);
            }
        }
    }

    /// Remove an attribute if declared, returning whether it was
    pub fn remove_attribute(&mut self, attribute: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|a| a != attribute);
        self.attributes.len() != before
    }

    /// Rename every occurrence of `old` to `new`, in place
    pub fn rename_attribute(&mut self, old: &str, new: &str) {
        for attribute in self.attributes.iter_mut().filter(|a| a.as_str() == old) {
            *attribute = new.to_string();
        }
    }
}
