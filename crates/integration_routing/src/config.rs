//! Routing service configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the routing service client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the routing service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (0 leaves requests unbounded)
    #[serde(default)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_user_agent() -> String {
    format!("BusMap/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 0,
            user_agent: default_user_agent(),
        }
    }
}

impl RoutingConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Check if a client-side timeout is configured
    #[must_use]
    pub const fn has_timeout(&self) -> bool {
        self.timeout_secs > 0
    }

    /// Full URL of an endpoint, e.g. `endpoint("find_route")`
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url).map_err(|e| format!("base_url is invalid: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must use http or https, got {}", url.scheme()));
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.timeout_secs, 0);
        assert!(!config.has_timeout());
        assert!(config.user_agent.starts_with("BusMap/"));
    }

    #[test]
    fn test_testing_config() {
        let config = RoutingConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.has_timeout());
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let config = RoutingConfig::default();
        assert_eq!(config.endpoint("find_route"), "http://127.0.0.1:5000/find_route");

        let config = RoutingConfig {
            base_url: "http://routing.local/api/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint("get_all_stops"), "http://routing.local/api/get_all_stops");
    }

    #[test]
    fn test_validation_success() {
        assert!(RoutingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let config = RoutingConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let config = RoutingConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RoutingConfig {
            base_url: "ftp://127.0.0.1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_blank_user_agent() {
        let config = RoutingConfig {
            user_agent: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{ "base_url": "http://10.0.0.2:5000" }"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.timeout_secs, 0);
    }
}
