//! API Gateway Library
//!
//! This crate provides the HTTP/JSON API that translates requests to
//! user-service gRPC calls.

pub mod clients;
pub mod config;
pub mod error_mapping;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clients::UserClient;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
///
/// The user-service is expected on `user_port` of the same host.
pub async fn run_embedded<F>(
    host: &str,
    port: u16,
    user_port: u16,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let mut config = GatewayConfig::from_env();
    config.user_service.endpoint = format!("http://{}:{}", dial_host(host), user_port);

    run_server(host, port, config, shutdown).await
}

/// Run the HTTP server with the given configuration.
///
/// Stops accepting connections once `shutdown` resolves and returns after
/// in-flight requests have finished.
pub async fn run_server<F>(
    host: &str,
    port: u16,
    config: GatewayConfig,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    // One client for the life of the process, injected through state
    let user_client = Arc::new(UserClient::connect_lazy(&config.user_service)?);
    info!(
        "Forwarding to user-service at {} (error mapping: {})",
        config.user_service.endpoint, config.error_mapping
    );

    // Create app state
    let state = AppState::new(user_client, config.error_mapping);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Gateway stopped");
    Ok(())
}

/// Address to dial for a service bound on `host`.
fn dial_host(host: &str) -> &str {
    match host {
        "0.0.0.0" => "127.0.0.1",
        "::" | "[::]" => "[::1]",
        other => other,
    }
}
