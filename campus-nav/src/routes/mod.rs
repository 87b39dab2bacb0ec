//! Route candidate pipeline.
//!
//! Takes the multi-route response of a directions provider, orders the
//! candidates by travel time, and caps how many are shown to the user:
//!
//! ```text
//! provider JSON -> RouteSet (validated) -> rank_routes -> RouteOption -> bound_routes
//! ```
//!
//! The envelope is checked once at the boundary ([`RouteSet::from_value`]);
//! everything after that works on validated data and cannot fail.

mod bound;
mod config;
mod envelope;
mod error;
mod option;
mod pipeline;
mod rank;

pub use bound::bound_routes;
pub use config::RouteConfig;
pub use envelope::{RouteCandidate, RouteSet};
pub use error::InvalidInputError;
pub use option::RouteOption;
pub use pipeline::{RankedRoutes, RoutePipeline};
pub use rank::{rank_route_value, rank_routes};
