//! Building geofences.
//!
//! Classifies the user's live position against a set of building polygons
//! so the map can switch between indoor and outdoor rendering. Building
//! outlines arrive as a GeoJSON feature collection; each location update is
//! evaluated against one immutable snapshot of that collection.
//!
//! Boundary policy: a position exactly on a building's outline (edge or
//! vertex) is outside that building.

mod building;
mod contains;
mod error;
mod feature;
mod feed;
mod set;
mod tracker;

pub use building::Building;
pub use contains::ring_contains;
pub use error::{FeedError, MalformedGeometryError};
pub use feature::{BuildingCollection, BuildingFeature, FeatureGeometry};
pub use feed::{BuildingFeed, FeedSnapshot};
pub use set::{BuildingSet, SkippedFeature};
pub use tracker::{
    ContainmentChange, ContainmentState, GeofenceFrame, GeofenceTracker, Highlight,
    HighlightStyle, classify, evaluate,
};
