//! Building identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one building feature in a GeoJSON collection.
///
/// Taken from the feature's `id` member when the collection provides one,
/// otherwise derived from the feature's position in the collection.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(String);

impl BuildingId {
    /// Create an identifier from an explicit feature id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for a feature that carries no `id` member.
    pub fn from_index(index: usize) -> Self {
        Self(format!("feature-{index}"))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuildingId({})", self.0)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_index() {
        assert_eq!(BuildingId::from_index(3).as_str(), "feature-3");
    }

    #[test]
    fn display_and_debug() {
        let id = BuildingId::new("hall");
        assert_eq!(id.to_string(), "hall");
        assert_eq!(format!("{:?}", id), "BuildingId(hall)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = BuildingId::new("EV");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""EV""#);
    }
}
