//! Application state for dependency injection.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use management_service_lib::infra::Database;
use management_service_lib::service::ManagementService;
use management_service_lib::Backend;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ManagementService>,
    /// Present when records live in PostgreSQL
    pub database: Option<Database>,
    /// Cancelled on shutdown; every request context derives from it
    pub shutdown: CancellationToken,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(backend: Backend, config: GatewayConfig) -> Self {
        Self {
            service: backend.service,
            database: backend.database,
            shutdown: CancellationToken::new(),
            config,
        }
    }
}
