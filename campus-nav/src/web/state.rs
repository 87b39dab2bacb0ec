//! Application state for the web layer.

use std::sync::Arc;

use crate::geofence::BuildingFeed;
use crate::routes::RouteConfig;

/// Shared application state.
///
/// Holds no per-user data: the containment state of each map view travels
/// with its requests.
#[derive(Clone)]
pub struct AppState {
    /// Current building outlines
    pub buildings: Arc<BuildingFeed>,

    /// Route pipeline configuration
    pub routes: Arc<RouteConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(buildings: BuildingFeed, routes: RouteConfig) -> Self {
        Self {
            buildings: Arc::new(buildings),
            routes: Arc::new(routes),
        }
    }
}
