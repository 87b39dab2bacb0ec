//! Campus navigation core.
//!
//! Two small pieces sit behind the campus map: the route candidate pipeline,
//! which orders and caps the routes a directions provider returns, and the
//! building geofence, which decides on every location update whether the
//! user is inside a building so the map can switch to its indoor view.

pub mod config;
pub mod domain;
pub mod geofence;
pub mod routes;
pub mod web;
