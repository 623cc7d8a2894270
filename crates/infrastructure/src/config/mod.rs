//! Application configuration
//!
//! Split into focused sub-modules:
//! - `map`: initial viewport
//! - `logging`: log level and format
//!
//! Routing and style sections reuse the types of the crates that consume
//! them.

mod logging;
mod map;

use std::path::Path;

use application::RouteStyle;
use integration_routing::RoutingConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use logging::LogConfig;
pub use map::{MAX_ZOOM, MapConfig};

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "BUSMAP";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_NAME: &str = "busmap";

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routing service connection
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Initial map viewport
    #[serde(default)]
    pub map: MapConfig,

    /// Route and stop drawing styles
    #[serde(default)]
    pub style: RouteStyle,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// Without `path`, `busmap.toml` (or any supported extension) in the
    /// working directory is used if present. With `path`, the file must
    /// exist. Environment variables override both, e.g.
    /// `BUSMAP_ROUTING__BASE_URL=http://10.0.0.5:5000`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = path.map_or_else(
            || config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
            |p| config::File::from(p).required(true),
        );

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("routing.base_url", "http://127.0.0.1:5000")?
            .set_default("map.zoom", 13)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables
            .add_source(env);

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate().map_err(config::ConfigError::Message)?;

        debug!(base_url = %config.routing.base_url, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.routing
            .validate()
            .map_err(|e| format!("routing: {e}"))?;
        self.map.validate()?;
        self.style.validate()?;
        self.log.validate()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
