//! Process configuration.
//!
//! Everything is read from environment variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `CAMPUS_NAV_ADDR` | `127.0.0.1:3000` | Listen address |
//! | `CAMPUS_NAV_BUILDINGS` | unset | GeoJSON file with building outlines |
//! | `CAMPUS_NAV_MAX_ROUTES` | `3` | Route candidates returned per request |

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use crate::routes::RouteConfig;

pub const ADDR_VAR: &str = "CAMPUS_NAV_ADDR";
pub const BUILDINGS_VAR: &str = "CAMPUS_NAV_BUILDINGS";
pub const MAX_ROUTES_VAR: &str = "CAMPUS_NAV_MAX_ROUTES";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("CAMPUS_NAV_ADDR: invalid socket address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("CAMPUS_NAV_MAX_ROUTES: expected a positive integer, got {value:?}")]
    InvalidMaxRoutes { value: String },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,

    /// Initial building outlines. Without one the server starts with no
    /// buildings and every position classifies as outside until a
    /// collection is uploaded.
    pub buildings_path: Option<PathBuf>,

    /// Route pipeline settings.
    pub routes: RouteConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr_value = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;

        let buildings_path = get(BUILDINGS_VAR).map(PathBuf::from);

        let routes = match get(MAX_ROUTES_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(max) if max > 0 => RouteConfig::new(max),
                _ => return Err(ConfigError::InvalidMaxRoutes { value }),
            },
            None => RouteConfig::default(),
        };

        Ok(Self {
            addr,
            buildings_path,
            routes,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            buildings_path: None,
            routes: RouteConfig::default(),
        }
    }
}
