//! Immutable snapshots of the building collection.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::BuildingId;

use super::building::{Building, explicit_feature_id, feature_id};
use super::error::{FeedError, MalformedGeometryError};
use super::feature::{BuildingCollection, BuildingFeature};

/// A building feature excluded from containment checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFeature {
    pub id: BuildingId,
    #[serde(serialize_with = "serialize_reason", rename = "reason")]
    pub error: MalformedGeometryError,
}

fn serialize_reason<S: serde::Serializer>(
    error: &MalformedGeometryError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Hands out identifiers that are unique within one set.
///
/// `reserved` holds every explicit id in the input. An explicit id keeps its
/// value unless an earlier slot already claimed it; a positional id also
/// yields to reserved ids. Clashing ids get a `-2`, `-3`, ... suffix.
struct IdAllocator {
    reserved: HashSet<BuildingId>,
    taken: HashSet<BuildingId>,
}

impl IdAllocator {
    fn new(reserved: HashSet<BuildingId>) -> Self {
        Self {
            reserved,
            taken: HashSet::new(),
        }
    }

    fn is_used(&self, id: &BuildingId) -> bool {
        self.taken.contains(id) || self.reserved.contains(id)
    }

    fn claim(&mut self, id: BuildingId, explicit: bool) -> BuildingId {
        let clashes = self.taken.contains(&id) || (!explicit && self.reserved.contains(&id));
        if !clashes {
            self.taken.insert(id.clone());
            return id;
        }

        let mut n = 2;
        let renamed = loop {
            let candidate = BuildingId::new(format!("{id}-{n}"));
            if !self.is_used(&candidate) {
                break candidate;
            }
            n += 1;
        };

        warn!(building = %id, renamed = %renamed, "duplicate building id");
        self.taken.insert(renamed.clone());
        renamed
    }
}

fn is_polygon(feature: &BuildingFeature) -> bool {
    feature.geometry.as_ref().is_some_and(|g| g.is_polygon())
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Building(Building),
    Skipped(SkippedFeature),
}

impl Slot {
    fn id(&self) -> &BuildingId {
        match self {
            Slot::Building(b) => b.id(),
            Slot::Skipped(s) => &s.id,
        }
    }
}

/// Building polygons for one evaluation pass, in collection order.
///
/// Polygon features with malformed outlines are kept as skipped entries so
/// the renderer still receives a (never highlighted) hint for them.
/// Non-polygon features are not buildings and are left out entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingSet {
    slots: Vec<Slot>,
}

impl BuildingSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from already validated buildings.
    ///
    /// Repeated ids are renamed so every building stays addressable.
    pub fn from_buildings(buildings: impl IntoIterator<Item = Building>) -> Self {
        let buildings: Vec<Building> = buildings.into_iter().collect();
        let mut ids = IdAllocator::new(buildings.iter().map(|b| b.id().clone()).collect());

        let slots = buildings
            .into_iter()
            .map(|building| {
                let id = ids.claim(building.id().clone(), true);
                Slot::Building(building.with_id(id))
            })
            .collect();

        Self { slots }
    }

    /// Build a set from a GeoJSON collection.
    ///
    /// Never fails as a whole: each malformed polygon is logged and skipped.
    /// Every building feature, valid or skipped, gets a distinct id.
    pub fn from_collection(collection: &BuildingCollection) -> Self {
        let mut ids = IdAllocator::new(
            collection
                .features
                .iter()
                .filter(|f| is_polygon(f))
                .filter_map(explicit_feature_id)
                .collect(),
        );
        let mut slots = Vec::with_capacity(collection.features.len());

        for (index, feature) in collection.features.iter().enumerate() {
            if !is_polygon(feature) {
                debug!(index, "ignoring non-polygon feature");
                continue;
            }

            let explicit = explicit_feature_id(feature).is_some();
            let id = ids.claim(feature_id(index, feature), explicit);

            match Building::from_feature(index, feature) {
                Ok(building) => slots.push(Slot::Building(building.with_id(id))),
                Err(error) => {
                    warn!(building = %id, %error, "skipping malformed building polygon");
                    slots.push(Slot::Skipped(SkippedFeature { id, error }));
                }
            }
        }

        let set = Self { slots };
        info!(
            buildings = set.len(),
            skipped = set.skipped().count(),
            "loaded building polygons"
        );
        set
    }

    /// Parse a GeoJSON document and build a set from it.
    pub fn from_geojson_str(json: &str) -> Result<Self, FeedError> {
        let collection: BuildingCollection = serde_json::from_str(json)?;
        Ok(Self::from_collection(&collection))
    }

    /// Valid buildings in collection order.
    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Building(b) => Some(b),
            Slot::Skipped(_) => None,
        })
    }

    /// Features excluded from containment checks.
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedFeature> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Skipped(s) => Some(s),
            Slot::Building(_) => None,
        })
    }

    /// Identifiers of every building feature, valid or skipped, in order.
    pub fn feature_ids(&self) -> impl Iterator<Item = &BuildingId> {
        self.slots.iter().map(Slot::id)
    }

    /// Look up a valid building by identifier.
    pub fn get(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings().find(|b| b.id() == id)
    }

    /// Returns the number of valid buildings.
    pub fn len(&self) -> usize {
        self.buildings().count()
    }

    /// Returns true if there are no valid buildings.
    pub fn is_empty(&self) -> bool {
        self.buildings().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMPUS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "H",
                "geometry": { "type": "Polygon", "coordinates": [[[0,0],[0,2],[2,2],[2,0],[0,0]]] },
                "properties": { "name": "Hall", "address": "1455 De Maisonneuve" }
            },
            {
                "type": "Feature",
                "id": "BROKEN",
                "geometry": { "type": "Polygon", "coordinates": [[[5,5],[6,6]]] },
                "properties": { "name": "Broken" }
            },
            {
                "type": "Feature",
                "id": "STOP",
                "geometry": { "type": "Point", "coordinates": [1, 1] },
                "properties": { "name": "Shuttle stop" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [[[10,10],[10,12],[12,12],[12,10]]] },
                "properties": { "name": "Annex" }
            }
        ]
    }"#;

    #[test]
    fn loads_valid_and_skips_malformed() {
        let set = BuildingSet::from_geojson_str(CAMPUS).unwrap();

        let names: Vec<_> = set.buildings().map(|b| b.name().unwrap()).collect();
        assert_eq!(names, vec!["Hall", "Annex"]);
        assert_eq!(set.len(), 2);

        let skipped: Vec<_> = set.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id.as_str(), "BROKEN");
        assert_eq!(
            skipped[0].error,
            MalformedGeometryError::TooFewVertices { count: 2 }
        );
    }

    #[test]
    fn feature_ids_in_collection_order() {
        let set = BuildingSet::from_geojson_str(CAMPUS).unwrap();
        let ids: Vec<_> = set.feature_ids().map(BuildingId::as_str).collect();
        assert_eq!(ids, vec!["H", "BROKEN", "feature-3"]);
    }

    #[test]
    fn duplicate_ids_are_made_unique() {
        let set = BuildingSet::from_geojson_str(
            r#"{
            "type": "FeatureCollection",
            "features": [
                { "id": "H", "geometry": { "type": "Polygon", "coordinates": [[[0,0],[0,2],[2,2],[2,0]]] } },
                { "id": "H", "geometry": { "type": "Polygon", "coordinates": [[[5,5],[6,6]]] } },
                { "geometry": { "type": "Polygon", "coordinates": [[[10,10],[10,12],[12,12],[12,10]]] } },
                { "id": "feature-2", "geometry": { "type": "Polygon", "coordinates": [[[20,20],[20,22],[22,22],[22,20]]] } },
                { "id": "H-2", "geometry": { "type": "Polygon", "coordinates": [[[30,30],[30,32],[32,32],[32,30]]] } }
            ]
        }"#,
        )
        .unwrap();

        let ids: Vec<_> = set.feature_ids().map(BuildingId::as_str).collect();
        assert_eq!(ids, vec!["H", "H-3", "feature-2-2", "feature-2", "H-2"]);

        assert_eq!(set.skipped().next().unwrap().id.as_str(), "H-3");
        let corner = |id: &str| {
            let building = set.get(&BuildingId::new(id)).unwrap();
            building.polygon().exterior().0[0]
        };
        assert_eq!(corner("feature-2-2"), geo::Coord { x: 10.0, y: 10.0 });
        assert_eq!(corner("feature-2"), geo::Coord { x: 20.0, y: 20.0 });
    }

    #[test]
    fn from_buildings_renames_repeats() {
        let square = |lat: f64| {
            Building::from_lat_lng(
                BuildingId::new("A"),
                None,
                &[(lat, 0.0), (lat, 1.0), (lat + 1.0, 1.0), (lat + 1.0, 0.0)],
            )
            .unwrap()
        };
        let set = BuildingSet::from_buildings([square(0.0), square(5.0)]);

        let ids: Vec<_> = set.feature_ids().map(BuildingId::as_str).collect();
        assert_eq!(ids, vec!["A", "A-2"]);
    }

    #[test]
    fn get_by_id() {
        let set = BuildingSet::from_geojson_str(CAMPUS).unwrap();
        assert_eq!(
            set.get(&BuildingId::new("H")).and_then(Building::address),
            Some("1455 De Maisonneuve")
        );
        assert!(set.get(&BuildingId::new("BROKEN")).is_none());
        assert!(set.get(&BuildingId::new("STOP")).is_none());
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            BuildingSet::from_geojson_str("not json"),
            Err(FeedError::Json(_))
        ));
    }

    #[test]
    fn empty_set() {
        let set = BuildingSet::new();
        assert!(set.is_empty());
        assert_eq!(set.feature_ids().count(), 0);
    }

    #[test]
    fn skipped_serializes_reason() {
        let skipped = SkippedFeature {
            id: BuildingId::new("X"),
            error: MalformedGeometryError::NonFiniteCoordinate,
        };
        assert_eq!(
            serde_json::to_value(&skipped).unwrap(),
            serde_json::json!({"id": "X", "reason": "ring has a non-finite coordinate"})
        );
    }
}
