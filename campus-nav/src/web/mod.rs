//! Web layer for campus navigation.
//!
//! A small JSON API over the route pipeline and the geofence tracker.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
