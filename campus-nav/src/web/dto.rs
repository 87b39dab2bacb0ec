//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{BuildingId, Position};
use crate::geofence::{
    Building, ContainmentChange, ContainmentState, GeofenceFrame, Highlight, SkippedFeature,
};

/// Query parameters for route ranking.
#[derive(Debug, Default, Deserialize)]
pub struct RankRoutesQuery {
    /// Override the configured number of routes returned
    pub limit: Option<usize>,
}

/// One location tick from a map view.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// Current user position
    pub position: Position,

    /// State returned by the previous tick (outside if omitted)
    #[serde(default)]
    pub previous: ContainmentState,
}

/// Short building description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingSummary {
    pub id: BuildingId,
    pub name: Option<String>,
    pub address: Option<String>,
}

impl BuildingSummary {
    pub fn from_building(building: &Building) -> Self {
        Self {
            id: building.id().clone(),
            name: building.name().map(str::to_string),
            address: building.address().map(str::to_string),
        }
    }
}

/// Result of one location tick.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// Whether the user is inside any building
    pub inside: bool,

    /// State to send back with the next tick
    pub state: ContainmentState,

    /// The containing building
    pub building: Option<BuildingSummary>,

    /// Draw directive for every building
    pub highlights: Vec<Highlight>,

    /// Enter/exit event, if the state changed
    pub change: Option<ContainmentChange>,

    /// Revision of the building set this tick was evaluated against
    pub revision: u64,
}

impl ClassifyResponse {
    pub fn from_frame(frame: GeofenceFrame, building: Option<&Building>, revision: u64) -> Self {
        Self {
            inside: frame.is_user_inside_building(),
            state: frame.state,
            building: building.map(BuildingSummary::from_building),
            highlights: frame.highlights,
            change: frame.change,
            revision,
        }
    }
}

/// A building with everything the inspect popup shows.
#[derive(Debug, Serialize)]
pub struct BuildingView {
    pub id: BuildingId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub centroid: Option<Position>,

    /// All GeoJSON properties of the feature
    pub properties: Map<String, Value>,
}

impl BuildingView {
    pub fn from_building(building: &Building) -> Self {
        Self {
            id: building.id().clone(),
            name: building.name().map(str::to_string),
            address: building.address().map(str::to_string),
            centroid: building.centroid(),
            properties: building.properties().clone(),
        }
    }
}

/// Response listing the current building set.
#[derive(Debug, Serialize)]
pub struct BuildingsResponse {
    pub revision: u64,
    pub buildings: Vec<BuildingView>,
    pub skipped: Vec<SkippedFeature>,
}

/// Response to replacing the building set.
#[derive(Debug, Serialize)]
pub struct ReplaceBuildingsResponse {
    pub revision: u64,

    /// Buildings usable for containment checks
    pub loaded: usize,

    /// Polygon features rejected as malformed
    pub skipped: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
