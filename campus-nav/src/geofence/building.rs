//! Validated building outlines.

use geo::{Centroid, Coord, LineString, Polygon};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{BuildingId, Position};

use super::contains::ring_contains;
use super::error::MalformedGeometryError;
use super::feature::BuildingFeature;

/// A building outline that is safe to run containment checks against.
///
/// The exterior ring has at least 3 vertices and every coordinate is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    id: BuildingId,
    name: Option<String>,
    address: Option<String>,
    properties: Map<String, Value>,
    polygon: Polygon<f64>,
}

impl Building {
    /// Build from a `(lat, lng)` vertex ring. The ring may be open or closed.
    pub fn from_lat_lng(
        id: BuildingId,
        name: Option<String>,
        ring: &[(f64, f64)],
    ) -> Result<Self, MalformedGeometryError> {
        let coords: Vec<Coord<f64>> = ring
            .iter()
            .map(|&(lat, lng)| Coord { x: lng, y: lat })
            .collect();
        let exterior = validate_ring(coords)?;

        Ok(Self {
            id,
            name,
            address: None,
            properties: Map::new(),
            polygon: Polygon::new(exterior, vec![]),
        })
    }

    /// Build from a GeoJSON polygon feature.
    ///
    /// `index` is the feature's position in its collection and is used as
    /// the identifier when the feature has no `id`. Interior rings that are
    /// themselves malformed are dropped; the exterior ring must be valid.
    pub fn from_feature(
        index: usize,
        feature: &BuildingFeature,
    ) -> Result<Self, MalformedGeometryError> {
        let id = feature_id(index, feature);

        let rings = feature
            .geometry
            .as_ref()
            .and_then(|g| g.coordinates.as_array())
            .ok_or(MalformedGeometryError::MissingCoordinates)?;

        let (exterior, interiors) = rings
            .split_first()
            .ok_or(MalformedGeometryError::MissingCoordinates)?;

        let exterior = validate_ring(parse_ring(exterior)?)?;

        let interiors = interiors
            .iter()
            .filter_map(|ring| match parse_ring(ring).and_then(validate_ring) {
                Ok(ring) => Some(ring),
                Err(e) => {
                    warn!(building = %id, error = %e, "dropping malformed interior ring");
                    None
                }
            })
            .collect();

        let properties = feature.properties.clone().unwrap_or_default();

        Ok(Self {
            id,
            name: feature.property_str("name").map(str::to_string),
            address: feature.property_str("address").map(str::to_string),
            properties,
            polygon: Polygon::new(exterior, interiors),
        })
    }

    /// Replace the identifier, keeping the outline and properties.
    pub(super) fn with_id(mut self, id: BuildingId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &BuildingId {
        &self.id
    }

    /// Display name, from the feature's `name` property.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Street address, from the feature's `address` property.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// All feature properties, for the click-to-inspect popup.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Whether the position lies strictly inside the outline.
    pub fn contains(&self, position: Position) -> bool {
        ring_contains(&self.polygon, position)
    }

    /// Area-weighted centroid of the outline.
    pub fn centroid(&self) -> Option<Position> {
        let point = self.polygon.centroid()?;
        Position::new(point.y(), point.x()).ok()
    }
}

/// The feature's `id`, or a positional identifier when it has none.
pub(super) fn feature_id(index: usize, feature: &BuildingFeature) -> BuildingId {
    explicit_feature_id(feature).unwrap_or_else(|| BuildingId::from_index(index))
}

/// The feature's own `id` member, when it is a string or number.
pub(super) fn explicit_feature_id(feature: &BuildingFeature) -> Option<BuildingId> {
    match &feature.id {
        Some(Value::String(s)) => Some(BuildingId::new(s.clone())),
        Some(Value::Number(n)) => Some(BuildingId::new(n.to_string())),
        _ => None,
    }
}

/// Parse a GeoJSON linear ring (`[[lng, lat], ...]`).
fn parse_ring(value: &Value) -> Result<Vec<Coord<f64>>, MalformedGeometryError> {
    let positions = value
        .as_array()
        .ok_or(MalformedGeometryError::MissingCoordinates)?;

    positions
        .iter()
        .map(|position| {
            let pair = position
                .as_array()
                .filter(|p| p.len() >= 2)
                .ok_or(MalformedGeometryError::MissingCoordinates)?;

            let x = pair[0]
                .as_f64()
                .ok_or(MalformedGeometryError::MissingCoordinates)?;
            let y = pair[1]
                .as_f64()
                .ok_or(MalformedGeometryError::MissingCoordinates)?;

            Ok(Coord { x, y })
        })
        .collect()
}

/// Check a ring has enough finite vertices.
fn validate_ring(mut coords: Vec<Coord<f64>>) -> Result<LineString<f64>, MalformedGeometryError> {
    if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(MalformedGeometryError::NonFiniteCoordinate);
    }

    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }

    if coords.len() < 3 {
        return Err(MalformedGeometryError::TooFewVertices {
            count: coords.len(),
        });
    }

    // Polygon::new closes the ring.
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(id: Option<Value>, rings: Value) -> BuildingFeature {
        let mut properties = Map::new();
        properties.insert("name".into(), json!("Library"));
        properties.insert("address".into(), json!("1400 Maisonneuve"));
        properties.insert("floors".into(), json!(6));
        BuildingFeature::polygon(id, rings, properties)
    }

    fn square() -> Value {
        json!([[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]])
    }

    #[test]
    fn from_feature_reads_properties() {
        let building = Building::from_feature(0, &feature(Some(json!("LB")), square())).unwrap();

        assert_eq!(building.id().as_str(), "LB");
        assert_eq!(building.name(), Some("Library"));
        assert_eq!(building.address(), Some("1400 Maisonneuve"));
        assert_eq!(building.properties()["floors"], 6);
    }

    #[test]
    fn id_fallbacks() {
        let numeric = Building::from_feature(0, &feature(Some(json!(17)), square())).unwrap();
        assert_eq!(numeric.id().as_str(), "17");

        let positional = Building::from_feature(4, &feature(None, square())).unwrap();
        assert_eq!(positional.id().as_str(), "feature-4");
    }

    #[test]
    fn open_and_closed_rings_match() {
        let closed = Building::from_feature(0, &feature(None, square())).unwrap();
        let open = Building::from_feature(
            0,
            &feature(None, json!([[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]])),
        )
        .unwrap();
        assert_eq!(closed.polygon(), open.polygon());
    }

    #[test]
    fn too_few_vertices() {
        let err = Building::from_feature(0, &feature(None, json!([[[0, 0], [1, 1], [0, 0]]])))
            .unwrap_err();
        assert_eq!(err, MalformedGeometryError::TooFewVertices { count: 2 });

        let err = Building::from_feature(0, &feature(None, json!([[]]))).unwrap_err();
        assert_eq!(err, MalformedGeometryError::TooFewVertices { count: 0 });
    }

    #[test]
    fn missing_coordinates() {
        for rings in [
            json!(null),
            json!([]),
            json!(["nope"]),
            json!([[[0.0], [1.0, 1.0], [2.0, 0.0]]]),
            json!([[["a", "b"], [1.0, 1.0], [2.0, 0.0]]]),
        ] {
            let err = Building::from_feature(0, &feature(None, rings)).unwrap_err();
            assert_eq!(err, MalformedGeometryError::MissingCoordinates);
        }
    }

    #[test]
    fn non_finite_vertex() {
        let err = Building::from_lat_lng(
            BuildingId::new("X"),
            None,
            &[(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)],
        )
        .unwrap_err();
        assert_eq!(err, MalformedGeometryError::NonFiniteCoordinate);
    }

    #[test]
    fn malformed_hole_is_dropped() {
        let rings = json!([
            [[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0]],
            [[1.0, 1.0], [1.0, 2.0]],
        ]);
        let building = Building::from_feature(0, &feature(None, rings)).unwrap();
        assert!(building.polygon().interiors().is_empty());
    }

    #[test]
    fn hole_excludes_courtyard() {
        let rings = json!([
            [[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0]],
            [[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0]],
        ]);
        let building = Building::from_feature(0, &feature(None, rings)).unwrap();

        assert!(building.contains(Position::new(0.5, 0.5).unwrap()));
        assert!(!building.contains(Position::new(2.0, 2.0).unwrap()));
    }

    #[test]
    fn lat_lng_ring_orientation() {
        // A tall thin building: lat 0..4, lng 0..1
        let building = Building::from_lat_lng(
            BuildingId::new("T"),
            Some("Tower".into()),
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (0.0, 1.0)],
        )
        .unwrap();

        assert!(building.contains(Position::new(3.0, 0.5).unwrap()));
        assert!(!building.contains(Position::new(0.5, 3.0).unwrap()));
        assert_eq!(building.address(), None);
    }

    #[test]
    fn centroid_of_square() {
        let building = Building::from_feature(0, &feature(None, square())).unwrap();
        let centroid = building.centroid().unwrap();
        assert!((centroid.lat() - 1.0).abs() < 1e-9);
        assert!((centroid.lng() - 1.0).abs() < 1e-9);
    }
}
