//! Travel duration as reported by a directions provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a provider duration value is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid duration: {reason}")]
pub struct InvalidDuration {
    reason: &'static str,
}

/// A non-negative travel time in whole seconds.
///
/// Directions providers report `legs[].duration.value` as an integer number
/// of seconds. Ordering on this type is the ordering routes are ranked by.
///
/// # Examples
///
/// ```
/// use campus_nav::domain::RouteDuration;
///
/// let d = RouteDuration::from_secs(125);
/// assert_eq!(d.whole_minutes(), 3);
///
/// assert!(RouteDuration::from_json(&serde_json::json!(-4)).is_err());
/// assert!(RouteDuration::from_json(&serde_json::json!(1.5)).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteDuration(u64);

impl RouteDuration {
    /// Create a duration from a number of seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Parse a duration from a JSON value.
    ///
    /// The value must be a non-negative integer.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, InvalidDuration> {
        let serde_json::Value::Number(number) = value else {
            return Err(InvalidDuration {
                reason: "must be a number",
            });
        };

        if let Some(secs) = number.as_u64() {
            return Ok(Self(secs));
        }

        if number.as_i64().is_some() {
            return Err(InvalidDuration {
                reason: "must not be negative",
            });
        }

        Err(InvalidDuration {
            reason: "must be a whole number of seconds",
        })
    }

    /// Seconds.
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Minutes, rounded up so that any non-zero trip shows at least 1 min.
    pub fn whole_minutes(&self) -> u64 {
        self.0.div_ceil(60)
    }
}

impl fmt::Debug for RouteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteDuration({}s)", self.0)
    }
}

impl fmt::Display for RouteDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.whole_minutes())
    }
}
