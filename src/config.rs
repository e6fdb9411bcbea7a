//! Service Configuration
//!
//! Host, port, and backing-store connection string. The `DATABASE_URI`
//! environment variable overrides the local default; CLI flags override both.

use serde::{Deserialize, Serialize};

/// Environment variable naming the backing store.
pub const DATABASE_URI_ENV: &str = "DATABASE_URI";

/// Product service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Backing store connection string
    #[serde(default = "default_database_uri")]
    pub database_uri: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_uri() -> String {
    "sqlite://products.db?mode=rwc".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_uri: default_database_uri(),
        }
    }
}

impl ServiceConfig {
    /// Defaults, with the database URI taken from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(uri) = std::env::var(DATABASE_URI_ENV) {
            config.database_uri = uri;
        }
        config
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
