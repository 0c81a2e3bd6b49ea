//! Combined binary - runs the gRPC service and the HTTP gateway in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{shutdown_signal, Shutdown};

#[derive(Parser)]
#[command(name = "user-crud")]
#[command(about = "User CRUD over gRPC and HTTP/JSON")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gRPC service and the HTTP gateway in a single process
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "GATEWAY_PORT", default_value = "8080")]
        http_port: u16,
        #[arg(long, env = "USER_SERVICE_PORT", default_value = "50051")]
        grpc_port: u16,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            http_port,
            grpc_port,
        } => {
            info!("Starting user CRUD services");
            info!("  HTTP gateway: http://{}:{}", host, http_port);
            info!("  gRPC service: http://{}:{}", host, grpc_port);

            let (trigger, shutdown) = Shutdown::channel();

            // gRPC service owns the database
            let user_host = host.clone();
            let user_shutdown = shutdown.clone().wait();
            let mut user_handle = tokio::spawn(async move {
                if let Err(e) =
                    user_service_lib::run_embedded(&user_host, grpc_port, user_shutdown).await
                {
                    error!("User service failed: {}", e);
                }
            });

            // Gateway dials the service lazily, so no start-up ordering is needed
            let gateway_host = host.clone();
            let gateway_shutdown = shutdown.wait();
            let mut gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(
                    &gateway_host,
                    http_port,
                    grpc_port,
                    gateway_shutdown,
                )
                .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Stop on a signal, or when either server exits on its own
            let mut user_done = false;
            let mut gateway_done = false;
            tokio::select! {
                _ = shutdown_signal() => {}
                _ = &mut user_handle => {
                    user_done = true;
                    error!("User service exited unexpectedly");
                }
                _ = &mut gateway_handle => {
                    gateway_done = true;
                    error!("Gateway exited unexpectedly");
                }
            }

            // Drain both servers
            trigger.trigger();
            if !gateway_done {
                if let Err(e) = gateway_handle.await {
                    error!("Gateway task panicked: {}", e);
                }
            }
            if !user_done {
                if let Err(e) = user_handle.await {
                    error!("User service task panicked: {}", e);
                }
            }
            info!("Shutdown complete");
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateAction::Up => user_service_lib::MigrateAction::Up,
                MigrateAction::Down => user_service_lib::MigrateAction::Down,
                MigrateAction::Status => user_service_lib::MigrateAction::Status,
                MigrateAction::Fresh => user_service_lib::MigrateAction::Fresh,
            };

            user_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
