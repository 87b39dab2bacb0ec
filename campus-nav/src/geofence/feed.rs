//! Building polygon update feed.
//!
//! Building outlines can change while the map is open (e.g. an admin uploads
//! a corrected collection). The feed holds the current snapshot; every
//! location tick takes one snapshot and evaluates against it, so a tick never
//! sees half of an old collection and half of a new one.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::error::FeedError;
use super::set::BuildingSet;

/// The building set current at one point in time.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Incremented on every replacement, starting at 0
    pub revision: u64,
    pub buildings: Arc<BuildingSet>,
}

/// Shared, replaceable building set.
#[derive(Debug)]
pub struct BuildingFeed {
    current: RwLock<FeedSnapshot>,
}

impl BuildingFeed {
    /// Create a feed starting with the given set.
    pub fn new(buildings: BuildingSet) -> Self {
        Self {
            current: RwLock::new(FeedSnapshot {
                revision: 0,
                buildings: Arc::new(buildings),
            }),
        }
    }

    /// Load the initial set from a GeoJSON file.
    pub fn from_path(path: &Path) -> Result<Self, FeedError> {
        let json = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let buildings = BuildingSet::from_geojson_str(&json)?;
        info!(path = %path.display(), "loaded building feed");

        Ok(Self::new(buildings))
    }

    /// The current set.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new set. Returns the new revision.
    pub fn replace(&self, buildings: BuildingSet) -> u64 {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        current.revision += 1;
        current.buildings = Arc::new(buildings);

        info!(
            revision = current.revision,
            buildings = current.buildings.len(),
            "replaced building set"
        );
        current.revision
    }
}

impl Default for BuildingFeed {
    fn default() -> Self {
        Self::new(BuildingSet::new())
    }
}
