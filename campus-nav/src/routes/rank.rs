//! Route ranking by travel time.

use serde_json::Value;

use super::envelope::RouteSet;
use super::error::InvalidInputError;

/// Rank candidates by first-leg duration, shortest first.
///
/// Returns a new set; the input is left untouched. The sort is stable, so
/// candidates with equal durations keep the order the provider gave them.
pub fn rank_routes(set: &RouteSet) -> RouteSet {
    let mut ranked = set.clone();
    ranked.routes.sort_by_key(|route| route.duration());
    ranked
}

/// Validate a raw provider response and return it with its routes ranked.
///
/// The output has the same shape as the input; only the order of
/// `data.routes` differs.
pub fn rank_route_value(value: Value) -> Result<Value, InvalidInputError> {
    let set = RouteSet::from_value(value)?;
    Ok(rank_routes(&set).into_value())
}
