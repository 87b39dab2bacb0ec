//! Domain types for campus navigation.
//!
//! These are the validated values that flow between the route pipeline and
//! the geofence tracker. All types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod building_id;
mod duration;
mod position;

pub use building_id::BuildingId;
pub use duration::{InvalidDuration, RouteDuration};
pub use position::{InvalidPosition, Position};
