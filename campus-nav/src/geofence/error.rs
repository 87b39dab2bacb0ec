//! Geofence error types.

use std::path::PathBuf;

/// A building outline that cannot be used for containment checks.
///
/// Only the affected building is excluded; the rest of the collection is
/// still evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedGeometryError {
    /// The ring has fewer than 3 vertices (not counting the closing vertex)
    #[error("ring has {count} vertices, need at least 3")]
    TooFewVertices { count: usize },

    /// A vertex has a NaN or infinite coordinate
    #[error("ring has a non-finite coordinate")]
    NonFiniteCoordinate,

    /// The coordinates are absent or not nested `[lng, lat]` arrays
    #[error("polygon coordinates are missing or malformed")]
    MissingCoordinates,
}

/// Errors loading a building collection.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Reading the GeoJSON file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a GeoJSON feature collection
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MalformedGeometryError::TooFewVertices { count: 2 };
        assert_eq!(err.to_string(), "ring has 2 vertices, need at least 3");

        let err = MalformedGeometryError::NonFiniteCoordinate;
        assert_eq!(err.to_string(), "ring has a non-finite coordinate");

        let err = MalformedGeometryError::MissingCoordinates;
        assert_eq!(err.to_string(), "polygon coordinates are missing or malformed");

        let err = FeedError::Io {
            path: PathBuf::from("/tmp/buildings.geojson"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read /tmp/buildings.geojson: no such file"
        );
    }
}
