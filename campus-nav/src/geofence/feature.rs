//! GeoJSON model for building outlines.
//!
//! Only the parts of GeoJSON the geofence needs are modelled. Coordinates are
//! kept as raw JSON because their nesting depends on the geometry type; they
//! are validated when a feature is turned into a [`super::Building`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON `FeatureCollection` of building outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingCollection {
    /// Always "FeatureCollection" in well-formed documents
    #[serde(rename = "type", default = "feature_collection")]
    pub kind: String,

    pub features: Vec<BuildingFeature>,
}

fn feature_collection() -> String {
    "FeatureCollection".to_string()
}

impl BuildingCollection {
    /// Create a collection from features.
    pub fn new(features: Vec<BuildingFeature>) -> Self {
        Self {
            kind: feature_collection(),
            features,
        }
    }
}

/// One GeoJSON `Feature`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingFeature {
    /// Feature identifier (string or number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// GeoJSON allows a null geometry
    pub geometry: Option<FeatureGeometry>,

    /// Display name, address and any other properties
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl BuildingFeature {
    /// Create a polygon feature from `[lng, lat]` rings.
    pub fn polygon(id: Option<Value>, rings: Value, properties: Map<String, Value>) -> Self {
        Self {
            id,
            geometry: Some(FeatureGeometry {
                kind: "Polygon".to_string(),
                coordinates: rings,
            }),
            properties: Some(properties),
        }
    }

    /// A string property, if present.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}

/// A GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureGeometry {
    /// Geometry type, e.g. "Polygon" or "Point"
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl FeatureGeometry {
    /// Returns true for `Polygon` geometries.
    pub fn is_polygon(&self) -> bool {
        self.kind == "Polygon"
    }
}
