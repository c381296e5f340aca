//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub storage: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/health", get(health_check))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/v1/heartbeat",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = String))
)]
pub async fn heartbeat() -> &'static str {
    "OK"
}

/// Health check endpoint - verifies storage connectivity.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage_health = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => ServiceHealth {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::error!("Database ping failed: {:?}", e);
                ServiceHealth {
                    status: "unhealthy".to_string(),
                    error: Some("database unreachable".to_string()),
                }
            }
        },
        None => ServiceHealth {
            status: "healthy".to_string(),
            error: None,
        },
    };

    let all_healthy = storage_health.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services: ServiceStatus {
            storage: storage_health,
        },
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
