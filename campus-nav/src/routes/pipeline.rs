//! The full ranking pipeline: validate, rank, flatten, bound.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::bound::bound_routes;
use super::config::RouteConfig;
use super::envelope::RouteSet;
use super::error::InvalidInputError;
use super::option::RouteOption;
use super::rank::rank_routes;

/// The candidates to show, fastest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRoutes {
    /// Provider status, passed through (null if the provider sent none)
    pub status: Value,

    /// At most `max_routes` options, fastest first
    pub routes: Vec<RouteOption>,

    /// Every other provider field, with `status` and `data.routes` taken out
    pub envelope: Map<String, Value>,
}

/// Runs a provider response through the ranker and the bounder.
#[derive(Debug, Clone)]
pub struct RoutePipeline {
    max_routes: usize,
}

impl RoutePipeline {
    /// Create a pipeline using the configured bound.
    pub fn new(config: &RouteConfig) -> Self {
        Self {
            max_routes: config.max_routes,
        }
    }

    /// Use a different bound for this pipeline.
    pub fn with_max_routes(mut self, max_routes: usize) -> Self {
        self.max_routes = max_routes;
        self
    }

    /// The bound applied after ranking.
    pub fn max_routes(&self) -> usize {
        self.max_routes
    }

    /// Validate, rank and bound a raw provider response.
    pub fn run(&self, value: Value) -> Result<RankedRoutes, InvalidInputError> {
        let set = RouteSet::from_value(value)?;
        Ok(self.run_validated(&set))
    }

    /// Rank and bound an already validated response.
    pub fn run_validated(&self, set: &RouteSet) -> RankedRoutes {
        let (mut envelope, candidates) = rank_routes(set).into_parts();
        let status = envelope.remove("status");
        let total = candidates.len();

        let options: Vec<RouteOption> = candidates.into_iter().map(RouteOption::from).collect();
        let routes = bound_routes(options, self.max_routes);

        debug!(
            total,
            kept = routes.len(),
            max = self.max_routes,
            "ranked route candidates"
        );

        RankedRoutes {
            status: status.unwrap_or(Value::Null),
            routes,
            envelope,
        }
    }
}

impl Default for RoutePipeline {
    fn default() -> Self {
        Self::new(&RouteConfig::default())
    }
}
