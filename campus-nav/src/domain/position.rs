//! Geographic position types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a latitude/longitude pair is not a usable position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid position: {reason}")]
pub struct InvalidPosition {
    reason: &'static str,
}

/// A validated WGS84 position.
///
/// Both coordinates are finite, latitude lies in `[-90, 90]` and longitude
/// in `[-180, 180]`. Any `Position` value is valid by construction.
///
/// # Examples
///
/// ```
/// use campus_nav::domain::Position;
///
/// let library = Position::new(45.4972, -73.5790).unwrap();
/// assert_eq!(library.lat(), 45.4972);
///
/// assert!(Position::new(91.0, 0.0).is_err());
/// assert!(Position::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    lat: f64,
    lng: f64,
}

impl Position {
    /// Create a position from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidPosition> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidPosition {
                reason: "coordinates must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidPosition {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidPosition {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// The position as a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            lng: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Position::new(raw.lat, raw.lng).map_err(serde::de::Error::custom)
    }
}
