//! Gateway configuration.

use std::env;

use common::{env_or, GrpcClientConfig};

use crate::error_mapping::ErrorMapping;

/// Gateway configuration.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    /// User service gRPC endpoint and timeouts
    pub user_service: GrpcClientConfig,
    /// How RPC failures become HTTP statuses
    pub error_mapping: ErrorMapping,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_service: GrpcClientConfig {
                endpoint: env::var("USER_SERVICE_URL").unwrap_or(defaults.user_service.endpoint),
                connect_timeout_ms: env_or(
                    "GATEWAY_CONNECT_TIMEOUT_MS",
                    defaults.user_service.connect_timeout_ms,
                ),
                request_timeout_ms: env_or(
                    "GATEWAY_REQUEST_TIMEOUT_MS",
                    defaults.user_service.request_timeout_ms,
                ),
            },
            error_mapping: env_or("GATEWAY_ERROR_MAPPING", defaults.error_mapping),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_reference_behaviour() {
        let config = GatewayConfig::default();
        assert_eq!(config.error_mapping, ErrorMapping::Compat);
        assert_eq!(config.user_service.request_timeout_ms, 1000);
    }
}
