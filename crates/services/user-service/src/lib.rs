//! User Service Library
//!
//! This crate provides user CRUD via gRPC over a PostgreSQL `users` table.
//! It can be run as a standalone service or embedded in the combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tonic::transport::Server;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Run the user service as an embedded component (for combined binary).
///
/// Stops accepting connections once `shutdown` resolves and returns after
/// in-flight requests have finished.
pub async fn run_embedded<F>(
    host: &str,
    port: u16,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()>,
{
    let config = UserServiceConfig::from_env();
    run_server_with_config(host, port, config, shutdown).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Wrap a user service in its generated tonic server.
pub fn grpc_server(
    service: Arc<dyn UserService>,
) -> proto::UserServiceServer<UserGrpcService> {
    proto::UserServiceServer::new(UserGrpcService::new(service))
}

/// tonic server builder enforcing a per-request deadline.
///
/// A request that overruns the deadline (or the client's `grpc-timeout`, if
/// shorter) is answered with `CANCELLED` and its handler future is dropped,
/// aborting any in-flight query.
pub fn server_builder(request_timeout: Duration) -> Server {
    Server::builder().timeout(request_timeout)
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config<F>(
    host: &str,
    port: u16,
    config: UserServiceConfig,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()>,
{
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create repository and service
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let user_service = Arc::new(UserManager::new(user_repo));

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("User service listening on {}", addr);

    // Run server
    server_builder(config.request_timeout())
        .add_service(grpc_server(user_service))
        .serve_with_shutdown(addr, shutdown)
        .await?;

    info!("User service stopped, closing database pool");
    db.close().await?;

    Ok(())
}
