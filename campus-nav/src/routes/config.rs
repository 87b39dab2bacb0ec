//! Route pipeline configuration.

/// Default number of route candidates shown to the user.
pub const DEFAULT_MAX_ROUTES: usize = 3;

/// Configuration parameters for the route pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Maximum number of candidates kept after ranking.
    pub max_routes: usize,
}

impl RouteConfig {
    /// Create a new configuration with the given bound.
    pub fn new(max_routes: usize) -> Self {
        Self { max_routes }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            max_routes: DEFAULT_MAX_ROUTES,
        }
    }
}
