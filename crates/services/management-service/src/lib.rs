//! Management Service Library
//!
//! Users, tasks and projects: validation, orchestration and storage.
//! The HTTP gateway and the combined binary embed it through [`connect`].

pub mod config;
pub mod context;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::config::{ManagementServiceConfig, StorageBackend};
use crate::infra::Database;
use crate::service::{ManagementService, ServiceConfig};

pub use crate::context::RequestContext;

/// A composed service plus the database handle backing it, if any.
#[derive(Clone)]
pub struct Backend {
    pub service: Arc<ManagementService>,
    pub database: Option<Database>,
}

/// Build the service for the configured storage backend.
///
/// PostgreSQL connections run pending migrations before the service is
/// returned.
pub async fn connect(config: &ManagementServiceConfig) -> Result<Backend, Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let service = ManagementService::new(ServiceConfig::postgres(db.get_connection()));
            info!("Management service ready (postgres)");
            Ok(Backend {
                service: Arc::new(service),
                database: Some(db),
            })
        }
        StorageBackend::Memory => {
            let service = ManagementService::new(ServiceConfig::in_memory());
            info!("Management service ready (in-memory)");
            Ok(Backend {
                service: Arc::new(service),
                database: None,
            })
        }
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = ManagementServiceConfig::from_env();
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
