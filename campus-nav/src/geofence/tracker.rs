//! Indoor/outdoor containment tracking.
//!
//! Each location update is one tick: the position is classified against
//! every building, each building gets a highlight directive, and the new
//! state is diffed against the previous one to produce an enter/exit event.
//!
//! The previous state belongs to the caller. [`evaluate`] takes it
//! explicitly and returns the next one; [`GeofenceTracker`] is a small
//! holder for callers that want one tracker per map view.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{BuildingId, Position};

use super::building::Building;
use super::set::BuildingSet;

/// Whether the user is inside a building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContainmentState {
    #[default]
    Outside,
    InsideBuilding { building: BuildingId },
}

impl ContainmentState {
    pub fn is_inside(&self) -> bool {
        matches!(self, ContainmentState::InsideBuilding { .. })
    }

    /// The containing building, if any.
    pub fn building(&self) -> Option<&BuildingId> {
        match self {
            ContainmentState::InsideBuilding { building } => Some(building),
            ContainmentState::Outside => None,
        }
    }
}

/// How the renderer should draw one building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStyle {
    /// The building the user is in
    Highlighted,
    Normal,
}

/// Draw directive for one building feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub building: BuildingId,
    pub style: HighlightStyle,
}

/// Edge event between two consecutive ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ContainmentChange {
    Entered { building: BuildingId },
    Exited { building: BuildingId },
    /// Went from one building straight into another
    Moved { from: BuildingId, to: BuildingId },
}

impl ContainmentChange {
    /// The change from `previous` to `next`, or `None` if they are equal.
    pub fn between(previous: &ContainmentState, next: &ContainmentState) -> Option<Self> {
        use ContainmentState::{InsideBuilding, Outside};

        match (previous, next) {
            (Outside, Outside) => None,
            (Outside, InsideBuilding { building }) => Some(Self::Entered {
                building: building.clone(),
            }),
            (InsideBuilding { building }, Outside) => Some(Self::Exited {
                building: building.clone(),
            }),
            (InsideBuilding { building: from }, InsideBuilding { building: to }) => {
                (from != to).then(|| Self::Moved {
                    from: from.clone(),
                    to: to.clone(),
                })
            }
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeofenceFrame {
    /// State to keep for the next tick
    pub state: ContainmentState,

    /// One directive per building feature, in collection order
    pub highlights: Vec<Highlight>,

    /// Set only when the state differs from the previous tick
    pub change: Option<ContainmentChange>,
}

impl GeofenceFrame {
    pub fn is_user_inside_building(&self) -> bool {
        self.state.is_inside()
    }
}

/// Classify a position against a building set.
///
/// If buildings overlap, the first containing building in collection order
/// wins.
pub fn classify(position: Position, buildings: &BuildingSet) -> ContainmentState {
    let mut containing = buildings.buildings().filter(|b| b.contains(position));

    let Some(first) = containing.next() else {
        return ContainmentState::Outside;
    };

    let others = containing.count();
    if others > 0 {
        debug!(
            building = %first.id(),
            others,
            "position inside overlapping buildings, keeping first"
        );
    }

    ContainmentState::InsideBuilding {
        building: first.id().clone(),
    }
}

/// Run one tick against caller-owned state.
pub fn evaluate(
    previous: &ContainmentState,
    position: Position,
    buildings: &BuildingSet,
) -> GeofenceFrame {
    let state = classify(position, buildings);

    let highlights = buildings
        .feature_ids()
        .map(|id| Highlight {
            building: id.clone(),
            style: if state.building() == Some(id) {
                HighlightStyle::Highlighted
            } else {
                HighlightStyle::Normal
            },
        })
        .collect();

    let change = ContainmentChange::between(previous, &state);

    debug!(%position, inside = state.is_inside(), "geofence tick");
    if let Some(change) = &change {
        info!(?change, "containment changed");
    }

    GeofenceFrame {
        state,
        highlights,
        change,
    }
}

/// Keeps the last known state for one map view.
#[derive(Debug, Clone, Default)]
pub struct GeofenceTracker {
    state: ContainmentState,
}

impl GeofenceTracker {
    /// Create a tracker that starts outside every building.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously observed state.
    pub fn with_state(state: ContainmentState) -> Self {
        Self { state }
    }

    /// The state after the last tick.
    pub fn state(&self) -> &ContainmentState {
        &self.state
    }

    /// Process one location update.
    ///
    /// The stored state is replaced in a single assignment after the frame is
    /// computed.
    pub fn update(&mut self, position: Position, buildings: &BuildingSet) -> GeofenceFrame {
        let frame = evaluate(&self.state, position, buildings);
        self.state = frame.state.clone();
        frame
    }

    /// The building the user is currently in, looked up in `buildings`.
    pub fn current_building<'a>(&self, buildings: &'a BuildingSet) -> Option<&'a Building> {
        buildings.get(self.state.building()?)
    }
}
