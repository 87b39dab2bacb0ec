//! Validated directions-provider envelope.
//!
//! A provider response looks like:
//!
//! ```json
//! { "status": 200, "data": { "routes": [ { "legs": [ { "duration": { "value": 540 } } ] } ] } }
//! ```
//!
//! Only `data.routes[].legs[0].duration.value` is interpreted. Every other
//! field, at every level, is carried through untouched.

use serde_json::{Map, Value};

use crate::domain::RouteDuration;

use super::error::InvalidInputError;

/// One candidate route from a directions provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    duration: RouteDuration,
    payload: Value,
}

impl RouteCandidate {
    /// Validate one candidate. `index` is its position in `data.routes`.
    pub fn from_value(index: usize, payload: Value) -> Result<Self, InvalidInputError> {
        let duration = first_leg(&payload)
            .and_then(|leg| leg.get("duration"))
            .and_then(|d| d.get("value"))
            .and_then(|v| RouteDuration::from_json(v).ok())
            .ok_or(InvalidInputError::MissingDuration { index })?;

        Ok(Self { duration, payload })
    }

    /// Travel time of the first leg.
    pub fn duration(&self) -> RouteDuration {
        self.duration
    }

    /// The candidate exactly as the provider sent it.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consume the candidate, returning the provider payload.
    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// The first leg of the route, if any.
    pub fn first_leg(&self) -> Option<&Value> {
        first_leg(&self.payload)
    }
}

fn first_leg(route: &Value) -> Option<&Value> {
    route.get("legs")?.get(0)
}

/// A validated provider response.
///
/// Holds the envelope (status and any other provider fields) separately from
/// the parsed candidates so that the candidates can be reordered and the
/// envelope reassembled unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSet {
    /// The response with `data.routes` taken out.
    envelope: Map<String, Value>,
    pub(super) routes: Vec<RouteCandidate>,
}

impl RouteSet {
    /// Validate a raw provider response.
    ///
    /// Zero or one candidates are valid; only the structure is checked.
    pub fn from_value(value: Value) -> Result<Self, InvalidInputError> {
        let Value::Object(mut envelope) = value else {
            return Err(InvalidInputError::MissingEnvelope);
        };

        let Some(Value::Object(data)) = envelope.get_mut("data") else {
            return Err(InvalidInputError::MissingData);
        };

        let Some(Value::Array(raw_routes)) = data.remove("routes") else {
            return Err(InvalidInputError::MissingRoutes);
        };

        let routes = raw_routes
            .into_iter()
            .enumerate()
            .map(|(index, route)| RouteCandidate::from_value(index, route))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { envelope, routes })
    }

    /// The provider status, if the response carried one.
    pub fn status(&self) -> Option<&Value> {
        self.envelope.get("status")
    }

    /// The candidates in their current order.
    pub fn routes(&self) -> &[RouteCandidate] {
        &self.routes
    }

    /// First-leg durations in current order.
    pub fn durations(&self) -> Vec<RouteDuration> {
        self.routes.iter().map(RouteCandidate::duration).collect()
    }

    /// Returns the number of candidates.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the provider returned no candidates.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Split into the envelope (without `data.routes`) and the candidates.
    pub fn into_parts(self) -> (Map<String, Value>, Vec<RouteCandidate>) {
        (self.envelope, self.routes)
    }

    /// Reassemble the provider response with the candidates in current order.
    pub fn into_value(self) -> Value {
        let mut envelope = self.envelope;
        let routes = self
            .routes
            .into_iter()
            .map(RouteCandidate::into_payload)
            .collect();

        // `data` is guaranteed to be an object by `from_value`.
        if let Some(Value::Object(data)) = envelope.get_mut("data") {
            data.insert("routes".to_string(), Value::Array(routes));
        }

        Value::Object(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(secs: u64, summary: &str) -> Value {
        json!({
            "summary": summary,
            "legs": [{ "duration": { "value": secs, "text": "x" }, "steps": [] }],
        })
    }

    #[test]
    fn parses_valid_envelope() {
        let value = json!({
            "status": 200,
            "data": { "routes": [route(120, "A"), route(60, "B")] },
        });

        let set = RouteSet::from_value(value).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.status(), Some(&json!(200)));
        assert_eq!(
            set.durations(),
            vec![RouteDuration::from_secs(120), RouteDuration::from_secs(60)]
        );
    }

    #[test]
    fn empty_and_single_are_valid() {
        let empty = RouteSet::from_value(json!({"status": "OK", "data": {"routes": []}})).unwrap();
        assert!(empty.is_empty());

        let single =
            RouteSet::from_value(json!({"status": "OK", "data": {"routes": [route(5, "A")]}}))
                .unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn missing_envelope() {
        assert_eq!(
            RouteSet::from_value(Value::Null),
            Err(InvalidInputError::MissingEnvelope)
        );
        assert_eq!(
            RouteSet::from_value(json!([1, 2])),
            Err(InvalidInputError::MissingEnvelope)
        );
    }

    #[test]
    fn missing_data() {
        assert_eq!(
            RouteSet::from_value(json!({"status": 200})),
            Err(InvalidInputError::MissingData)
        );
        assert_eq!(
            RouteSet::from_value(json!({"status": 200, "data": null})),
            Err(InvalidInputError::MissingData)
        );
    }

    #[test]
    fn missing_routes() {
        assert_eq!(
            RouteSet::from_value(json!({"status": 200, "data": {}})),
            Err(InvalidInputError::MissingRoutes)
        );
        assert_eq!(
            RouteSet::from_value(json!({"status": 200, "data": {"routes": {}}})),
            Err(InvalidInputError::MissingRoutes)
        );
    }

    #[test]
    fn candidate_without_duration() {
        let value = json!({
            "status": 200,
            "data": { "routes": [route(10, "A"), { "legs": [] }] },
        });
        assert_eq!(
            RouteSet::from_value(value),
            Err(InvalidInputError::MissingDuration { index: 1 })
        );

        let value = json!({
            "data": { "routes": [{ "legs": [{ "duration": { "value": "ten" } }] }] },
        });
        assert_eq!(
            RouteSet::from_value(value),
            Err(InvalidInputError::MissingDuration { index: 0 })
        );
    }

    #[test]
    fn into_value_preserves_everything() {
        let value = json!({
            "status": 200,
            "headers": { "x-provider": "directions" },
            "data": {
                "geocoded_waypoints": [{ "place_id": "abc" }],
                "routes": [route(120, "A"), route(60, "B")],
            },
        });

        let set = RouteSet::from_value(value.clone()).unwrap();
        assert_eq!(set.into_value(), value);
    }

    #[test]
    fn into_parts_without_status() {
        let set = RouteSet::from_value(json!({"data": {"routes": [route(1, "A")]}})).unwrap();
        assert!(set.status().is_none());

        let (envelope, routes) = set.into_parts();
        assert_eq!(Value::Object(envelope), json!({"data": {}}));
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].payload()["summary"], "A");
    }

    #[test]
    fn first_leg_accessor() {
        let candidate = RouteCandidate::from_value(0, route(42, "A")).unwrap();
        assert_eq!(candidate.duration(), RouteDuration::from_secs(42));
        assert_eq!(candidate.first_leg().unwrap()["duration"]["text"], "x");
    }
}
