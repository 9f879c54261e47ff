//! Process configuration
//!
//! Connection and bind settings are a bootstrap concern; nothing in the
//! aggregation core reads the environment.

use std::env;

/// Graph store connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bolt URI
    pub uri: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
        }
    }
}

/// Full process configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection settings
    pub store: StoreConfig,
    /// HTTP bind address
    pub http_address: String,
    /// HTTP port
    pub http_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            http_address: "0.0.0.0".to_string(),
            http_port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// Recognized variables: `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`,
    /// `DNSGRAPH_HTTP_ADDR`, `DNSGRAPH_HTTP_PORT`.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            store: StoreConfig {
                uri: env::var("NEO4J_URI").unwrap_or(defaults.store.uri),
                user: env::var("NEO4J_USER").unwrap_or(defaults.store.user),
                password: env::var("NEO4J_PASSWORD").unwrap_or(defaults.store.password),
            },
            http_address: env::var("DNSGRAPH_HTTP_ADDR").unwrap_or(defaults.http_address),
            http_port: env::var("DNSGRAPH_HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.uri, "bolt://localhost:7687");
        assert_eq!(config.store.user, "neo4j");
        assert_eq!(config.http_port, 3000);
    }
}
