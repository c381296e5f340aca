//! Project management server: the HTTP API and its storage in one process.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;
use management_service_lib::config::{ManagementServiceConfig, StorageBackend};

#[derive(Parser)]
#[command(name = "project-management")]
#[command(about = "Users, tasks and projects over a REST API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Overrides GATEWAY_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides GATEWAY_PORT
        #[arg(long)]
        port: Option<u16>,
        /// postgres or memory; overrides STORAGE_BACKEND
        #[arg(long)]
        storage: Option<StorageBackend>,
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

impl From<MigrateAction> for management_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
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
        Commands::Serve { host, port, storage } => {
            let mut service_config = ManagementServiceConfig::from_env();
            if let Some(storage) = storage {
                service_config = service_config.with_storage(storage);
            }

            let mut gateway_config = GatewayConfig::from_env();
            if let Some(host) = host {
                gateway_config.host = host;
            }
            if let Some(port) = port {
                gateway_config.port = port;
            }

            info!("Starting with {} storage", service_config.storage);
            let backend = management_service_lib::connect(&service_config).await?;
            gateway_lib::serve(backend, gateway_config).await?;
        }
        Commands::Migrate { action } => {
            management_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}
