//! Server configuration.
//!
//! Defaults match the shipped deployment (REST on 8080, WebSocket feed on
//! 8081); any field can be overridden through `MATCHBOOK_`-prefixed
//! environment variables, e.g. `MATCHBOOK_HTTP_ADDR=127.0.0.1:9090`.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST API bind address
    pub http_addr: SocketAddr,
    /// WebSocket feed bind address
    pub ws_addr: SocketAddr,
    /// Pre-allocated order slots in the book
    pub book_capacity: usize,
    /// Seed the demonstration book at startup
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".parse().unwrap(),
            ws_addr: "0.0.0.0:8081".parse().unwrap(),
            book_capacity: 16_384,
            seed_demo: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `MATCHBOOK_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("MATCHBOOK"))
            .build()?;

        cfg.try_deserialize()
    }
}
