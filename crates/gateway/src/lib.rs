//! API Gateway Library
//!
//! HTTP REST API over the management service: routing, extraction of
//! request contexts and payloads, and the JSON envelope.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use management_service_lib::Backend;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Serve the API until ctrl-c or SIGTERM.
///
/// In-flight requests observe shutdown through their context's cancellation
/// token.
pub async fn serve(backend: Backend, config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(backend, config);
    let shutdown = state.shutdown.clone();
    let addr = state.config.bind_address();

    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    token.cancel();
}
