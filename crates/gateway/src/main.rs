//! API Gateway - HTTP/JSON front for the user-service.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "HTTP/JSON gateway for the user-service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "GATEWAY_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "GATEWAY_PORT", default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            // Standalone mode talks to USER_SERVICE_URL as configured
            gateway_lib::run_server(&host, port, config, common::shutdown_signal()).await?;
        }
    }

    Ok(())
}
