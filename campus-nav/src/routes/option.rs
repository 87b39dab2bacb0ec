//! Flat route entries for display.

use serde::Serialize;
use serde_json::Value;

use crate::domain::RouteDuration;

use super::envelope::RouteCandidate;

/// A route candidate flattened for the route picker.
///
/// Unlike [`RouteCandidate`], the duration sits at the top level. The full
/// provider payload is kept under `route` so the map can still draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    /// First-leg travel time in seconds
    pub duration: RouteDuration,

    /// Provider's human-readable duration (e.g. "9 mins")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_text: Option<String>,

    /// First-leg distance in metres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u64>,

    /// Provider's route summary (usually the main street taken)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// The candidate exactly as the provider sent it
    pub route: Value,
}

impl From<RouteCandidate> for RouteOption {
    fn from(candidate: RouteCandidate) -> Self {
        let duration = candidate.duration();

        let (duration_text, distance_meters) = match candidate.first_leg() {
            Some(leg) => (
                leg.pointer("/duration/text")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                leg.pointer("/distance/value").and_then(Value::as_u64),
            ),
            None => (None, None),
        };

        let summary = candidate
            .payload()
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            duration,
            duration_text,
            distance_meters,
            summary,
            route: candidate.into_payload(),
        }
    }
}
