//! User service configuration.

use std::env;
use std::time::Duration;

use common::{env_or, DatabaseConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Database pool settings
    pub database: DatabaseConfig,
    /// Per-request deadline enforced by the gRPC server, in milliseconds
    pub request_timeout_ms: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env_or(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                ),
                min_connections: env_or(
                    "DATABASE_MIN_CONNECTIONS",
                    defaults.database.min_connections,
                ),
                connect_timeout_ms: env_or(
                    "DATABASE_CONNECT_TIMEOUT_MS",
                    defaults.database.connect_timeout_ms,
                ),
            },
            request_timeout_ms: env_or("USER_SERVICE_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            request_timeout_ms: 5000,
        }
    }
}
